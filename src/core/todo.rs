use crate::core::progress::progress_update;
use crate::core::project::ProjectLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::projects::set_project_progress;
use crate::db::queries::todos::{delete_todo, insert_todo, load_todo, load_todos, update_todo};
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewTodo, Todo, TodoPatch};
use rusqlite::Connection;

pub struct TodoLogic;

/// Outcome of a todo change: the todo and the project's progress afterwards.
#[derive(Debug)]
pub struct TodoChange {
    pub todo: Todo,
    pub progress: u8,
    pub progress_changed: bool,
}

/// Recompute the progress of `project_id` from its todos and store it if it
/// moved. Returns the current value and whether it was written.
pub fn refresh_project_progress(
    conn: &Connection,
    owner_id: &str,
    project_id: i64,
) -> AppResult<(u8, bool)> {
    let project = ProjectLogic::owned(conn, owner_id, project_id)?;
    let todos = load_todos(conn, project_id, owner_id)?;

    match progress_update(project.progress, &todos) {
        Some(fresh) => {
            set_project_progress(conn, project_id, fresh)?;
            ttlog(
                conn,
                "progress",
                &format!("project #{}", project_id),
                &format!("{}% → {}%", project.progress, fresh),
            )?;
            Ok((fresh, true))
        }
        None => Ok((project.progress, false)),
    }
}

impl TodoLogic {
    fn owned(conn: &Connection, owner_id: &str, id: i64) -> AppResult<Todo> {
        load_todo(conn, id)?
            .filter(|t| t.owner_id == owner_id)
            .ok_or(AppError::TodoNotFound(id))
    }

    pub fn add(pool: &mut DbPool, owner_id: &str, input: &NewTodo) -> AppResult<TodoChange> {
        if input.title.trim().is_empty() {
            return Err(AppError::Other("Todo title cannot be empty".into()));
        }

        pool.with_tx(|tx| {
            ProjectLogic::owned(tx, owner_id, input.project_id)?;
            let id = insert_todo(tx, owner_id, input)?;
            ttlog(tx, "add", &format!("todo #{}", id), &input.title)?;

            let todo = Self::owned(tx, owner_id, id)?;
            let (progress, progress_changed) =
                refresh_project_progress(tx, owner_id, input.project_id)?;

            Ok(TodoChange {
                todo,
                progress,
                progress_changed,
            })
        })
    }

    pub fn update(
        pool: &mut DbPool,
        owner_id: &str,
        id: i64,
        patch: &TodoPatch,
    ) -> AppResult<TodoChange> {
        pool.with_tx(|tx| {
            Self::owned(tx, owner_id, id)?;
            if update_todo(tx, id, patch)? > 0 {
                ttlog(tx, "edit", &format!("todo #{}", id), "Todo updated")?;
            }

            let todo = Self::owned(tx, owner_id, id)?;
            let (progress, progress_changed) =
                refresh_project_progress(tx, owner_id, todo.project_id)?;

            Ok(TodoChange {
                todo,
                progress,
                progress_changed,
            })
        })
    }

    /// Flip the completed flag.
    pub fn toggle(pool: &mut DbPool, owner_id: &str, id: i64) -> AppResult<TodoChange> {
        let current = Self::owned(&pool.conn, owner_id, id)?;
        let patch = TodoPatch {
            completed: Some(!current.completed),
            ..TodoPatch::default()
        };
        Self::update(pool, owner_id, id, &patch)
    }

    pub fn delete(pool: &mut DbPool, owner_id: &str, id: i64) -> AppResult<TodoChange> {
        pool.with_tx(|tx| {
            let todo = Self::owned(tx, owner_id, id)?;
            delete_todo(tx, id)?;
            ttlog(tx, "del", &format!("todo #{}", id), &todo.title)?;

            let (progress, progress_changed) =
                refresh_project_progress(tx, owner_id, todo.project_id)?;

            Ok(TodoChange {
                todo,
                progress,
                progress_changed,
            })
        })
    }

    pub fn list(pool: &DbPool, owner_id: &str, project_id: i64) -> AppResult<Vec<Todo>> {
        ProjectLogic::owned(&pool.conn, owner_id, project_id)?;
        load_todos(&pool.conn, project_id, owner_id)
    }
}
