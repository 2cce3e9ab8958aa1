use super::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewTodo, Priority, Todo, TodoPatch};
use chrono::Local;
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

pub fn map_todo(row: &Row) -> rusqlite::Result<Todo> {
    let priority_str: String = row.get("priority")?;
    let priority = Priority::from_db_str(&priority_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidPriority(priority_str.clone())))?;

    Ok(Todo {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        owner_id: row.get("owner_id")?,
        title: row.get("title")?,
        priority,
        completed: row.get::<_, i32>("completed")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_todo(conn: &Connection, owner_id: &str, t: &NewTodo) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO todos (project_id, owner_id, title, priority, completed, created_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        params![
            t.project_id,
            owner_id,
            t.title,
            t.priority.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_todo(conn: &Connection, id: i64) -> AppResult<Option<Todo>> {
    let todo = conn
        .query_row("SELECT * FROM todos WHERE id = ?1", [id], map_todo)
        .optional()?;
    Ok(todo)
}

/// Todos of a project for `owner_id`, newest first.
pub fn load_todos(conn: &Connection, project_id: i64, owner_id: &str) -> AppResult<Vec<Todo>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM todos
         WHERE project_id = ?1 AND owner_id = ?2
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![project_id, owner_id], map_todo)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_todo(conn: &Connection, id: i64, patch: &TodoPatch) -> AppResult<usize> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(title) = &patch.title {
        sets.push("title = ?");
        values.push(Box::new(title.clone()));
    }
    if let Some(priority) = patch.priority {
        sets.push("priority = ?");
        values.push(Box::new(priority.to_db_str()));
    }
    if let Some(completed) = patch.completed {
        sets.push("completed = ?");
        values.push(Box::new(if completed { 1 } else { 0 }));
    }

    if sets.is_empty() {
        return Ok(0);
    }

    let sql = format!("UPDATE todos SET {} WHERE id = ?", sets.join(", "));
    values.push(Box::new(id));

    let n = conn.execute(&sql, params_from_iter(values.iter()))?;
    Ok(n)
}

pub fn delete_todo(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
    Ok(n)
}
