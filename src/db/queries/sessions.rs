use super::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::mode::SessionMode;
use crate::models::session::{SessionRecord, SessionView};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

const SESSION_COLUMNS: &str = "s.id AS id, s.owner_id AS owner_id, s.task_id AS task_id, \
     s.type AS type, s.start_time AS start_time, s.end_time AS end_time, \
     s.duration AS duration, s.created_at AS created_at";

pub fn map_session(row: &Row) -> rusqlite::Result<SessionRecord> {
    let mode_str: String = row.get("type")?;
    let mode = SessionMode::from_db_str(&mode_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidMode(mode_str.clone())))?;

    Ok(SessionRecord {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        task_id: row.get("task_id")?,
        mode,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        duration_seconds: row.get("duration")?,
        created_at: row.get("created_at")?,
    })
}

fn map_session_view(row: &Row) -> rusqlite::Result<SessionView> {
    Ok(SessionView {
        record: map_session(row)?,
        task_name: row.get("task_name")?,
    })
}

/// Insert a reconciled session; returns the new row id.
/// The owning task's running total is bumped in the same call.
pub fn insert_session(conn: &Connection, s: &SessionRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (owner_id, task_id, type, start_time, end_time, duration, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            s.owner_id,
            s.task_id,
            s.mode.to_db_str(),
            s.start_time,
            s.end_time,
            s.duration_seconds,
            s.created_at,
        ],
    )?;
    let id = conn.last_insert_rowid();

    if let Some(task_id) = s.task_id {
        super::tasks::add_task_duration(conn, task_id, s.duration_seconds)?;
    }

    Ok(id)
}

pub fn load_session(conn: &Connection, id: i64) -> AppResult<Option<SessionRecord>> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions s WHERE s.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map([id], map_session)?;

    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn count_sessions(conn: &Connection, owner_id: &str) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE owner_id = ?1",
        [owner_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

/// Sessions of `owner_id` with their task name, newest start first.
/// `bounds` filters on the (UTC) start date, both ends inclusive.
pub fn load_sessions(
    conn: &Connection,
    owner_id: &str,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<SessionView>> {
    let (from, to) = match bounds {
        Some((a, b)) => (a.format("%Y-%m-%d").to_string(), b.format("%Y-%m-%d").to_string()),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let sql = format!(
        "SELECT {SESSION_COLUMNS}, t.name AS task_name
         FROM sessions s
         LEFT JOIN tasks t ON t.id = s.task_id
         WHERE s.owner_id = ?1
           AND substr(s.start_time, 1, 10) BETWEEN ?2 AND ?3
         ORDER BY s.start_time DESC, s.id DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner_id, from, to], map_session_view)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// One page of [`load_sessions`] (no date filter).
pub fn load_session_page(
    conn: &Connection,
    owner_id: &str,
    limit: usize,
    offset: usize,
) -> AppResult<Vec<SessionView>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS}, t.name AS task_name
         FROM sessions s
         LEFT JOIN tasks t ON t.id = s.task_id
         WHERE s.owner_id = ?1
         ORDER BY s.start_time DESC, s.id DESC
         LIMIT ?2 OFFSET ?3"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![owner_id, limit as i64, offset as i64],
        map_session_view,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
