use super::{conversion_error, progress_from_db};
use crate::errors::{AppError, AppResult};
use crate::models::task::{Subtask, Task, TaskStatus};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_task(row: &Row) -> rusqlite::Result<Task> {
    let status_str: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidStatus(status_str.clone())))?;

    let subtasks_json: String = row.get("subtasks")?;
    let subtasks: Vec<Subtask> = serde_json::from_str(&subtasks_json)
        .map_err(|e| conversion_error(5, AppError::from(e)))?;

    Ok(Task {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status,
        subtasks,
        progress: progress_from_db(row.get("progress")?),
        total_duration: row.get("total_duration")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn find_task_by_name(conn: &Connection, owner_id: &str, name: &str) -> AppResult<Option<Task>> {
    let task = conn
        .query_row(
            "SELECT * FROM tasks WHERE owner_id = ?1 AND name = ?2 LIMIT 1",
            params![owner_id, name],
            map_task,
        )
        .optional()?;
    Ok(task)
}

pub fn load_task(conn: &Connection, id: i64) -> AppResult<Option<Task>> {
    let task = conn
        .query_row("SELECT * FROM tasks WHERE id = ?1", [id], map_task)
        .optional()?;
    Ok(task)
}

/// Tasks of `owner_id`, newest first.
pub fn load_tasks(conn: &Connection, owner_id: &str) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM tasks
         WHERE owner_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([owner_id], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_task(
    conn: &Connection,
    owner_id: &str,
    name: &str,
    description: Option<&str>,
    subtasks: &[Subtask],
    progress: u8,
) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO tasks (owner_id, name, description, status, subtasks, progress,
                            total_duration, created_at, updated_at)
         VALUES (?1, ?2, ?3, 'active', ?4, ?5, 0, ?6, ?6)",
        params![
            owner_id,
            name,
            description,
            serde_json::to_string(subtasks)?,
            progress,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite description and subtasks (and the progress derived from them).
pub fn update_task_details(
    conn: &Connection,
    id: i64,
    description: Option<&str>,
    subtasks: &[Subtask],
    progress: u8,
) -> AppResult<()> {
    conn.execute(
        "UPDATE tasks
         SET description = ?1, subtasks = ?2, progress = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            description,
            serde_json::to_string(subtasks)?,
            progress,
            Local::now().to_rfc3339(),
            id,
        ],
    )?;
    Ok(())
}

pub fn set_task_status(conn: &Connection, id: i64, status: TaskStatus) -> AppResult<()> {
    conn.execute(
        "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.to_db_str(), Local::now().to_rfc3339(), id],
    )?;
    Ok(())
}

pub fn add_task_duration(conn: &Connection, id: i64, seconds: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE tasks SET total_duration = total_duration + ?1 WHERE id = ?2",
        params![seconds, id],
    )?;
    Ok(())
}
