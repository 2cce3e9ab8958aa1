use super::{conversion_error, progress_from_db};
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewProject, Project, ProjectPatch, ProjectStatus};
use chrono::{Local, NaiveDate};
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

pub fn map_project(row: &Row) -> rusqlite::Result<Project> {
    let tags_json: String = row.get("tags")?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| conversion_error(4, AppError::from(e)))?;

    let status_str: String = row.get("status")?;
    let status = ProjectStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(7, AppError::InvalidStatus(status_str.clone())))?;

    let estimation: Option<String> = row.get("estimation_date")?;
    let estimation_date = match estimation {
        Some(s) if !s.is_empty() => Some(
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|_| conversion_error(8, AppError::InvalidDate(s.clone())))?,
        ),
        _ => None,
    };

    Ok(Project {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        tags,
        notes: row.get("notes")?,
        progress: progress_from_db(row.get("progress")?),
        status,
        estimation_date,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_project(conn: &Connection, owner_id: &str, p: &NewProject) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO projects (owner_id, title, description, tags, notes, progress, status,
                               estimation_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, 'pending', ?6, ?7)",
        params![
            owner_id,
            p.title,
            p.description,
            serde_json::to_string(&p.tags)?,
            p.notes,
            p.estimation_date.map(|d| d.format("%Y-%m-%d").to_string()),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_project(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let project = conn
        .query_row("SELECT * FROM projects WHERE id = ?1", [id], map_project)
        .optional()?;
    Ok(project)
}

/// Projects of `owner_id`, newest first.
pub fn load_projects(conn: &Connection, owner_id: &str) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM projects
         WHERE owner_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([owner_id], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Apply the non-empty fields of `patch`. Returns the number of rows touched.
pub fn update_project(conn: &Connection, id: i64, patch: &ProjectPatch) -> AppResult<usize> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(title) = &patch.title {
        sets.push("title = ?");
        values.push(Box::new(title.clone()));
    }
    if let Some(description) = &patch.description {
        sets.push("description = ?");
        values.push(Box::new(description.clone()));
    }
    if let Some(tags) = &patch.tags {
        sets.push("tags = ?");
        values.push(Box::new(serde_json::to_string(tags)?));
    }
    if let Some(notes) = &patch.notes {
        sets.push("notes = ?");
        values.push(Box::new(notes.clone()));
    }
    if let Some(status) = patch.status {
        sets.push("status = ?");
        values.push(Box::new(status.to_db_str()));
    }
    if let Some(date) = patch.estimation_date {
        sets.push("estimation_date = ?");
        values.push(Box::new(date.format("%Y-%m-%d").to_string()));
    }

    if sets.is_empty() {
        return Ok(0);
    }

    let sql = format!("UPDATE projects SET {} WHERE id = ?", sets.join(", "));
    values.push(Box::new(id));

    let n = conn.execute(&sql, params_from_iter(values.iter()))?;
    Ok(n)
}

pub fn set_project_progress(conn: &Connection, id: i64, progress: u8) -> AppResult<()> {
    conn.execute(
        "UPDATE projects SET progress = ?1 WHERE id = ?2",
        params![progress, id],
    )?;
    Ok(())
}

/// Delete a project and its todos.
pub fn delete_project(conn: &Connection, id: i64) -> AppResult<usize> {
    conn.execute("DELETE FROM todos WHERE project_id = ?1", [id])?;
    let n = conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
    Ok(n)
}
