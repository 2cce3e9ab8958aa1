use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::projects::{
    delete_project, insert_project, load_project, load_projects, update_project,
};
use crate::db::queries::todos::load_todos;
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewProject, Project, ProjectPatch, Todo};
use rusqlite::Connection;

pub struct ProjectLogic;

impl ProjectLogic {
    /// Load a project, checking it belongs to `owner_id`.
    pub fn owned(conn: &Connection, owner_id: &str, id: i64) -> AppResult<Project> {
        load_project(conn, id)?
            .filter(|p| p.owner_id == owner_id)
            .ok_or(AppError::ProjectNotFound(id))
    }

    pub fn create(pool: &mut DbPool, owner_id: &str, input: &NewProject) -> AppResult<Project> {
        if input.title.trim().is_empty() {
            return Err(AppError::Other("Project title cannot be empty".into()));
        }

        pool.with_tx(|tx| {
            let id = insert_project(tx, owner_id, input)?;
            ttlog(tx, "add", &format!("project #{}", id), &input.title)?;
            Self::owned(tx, owner_id, id)
        })
    }

    pub fn update(
        pool: &mut DbPool,
        owner_id: &str,
        id: i64,
        patch: &ProjectPatch,
    ) -> AppResult<Project> {
        pool.with_tx(|tx| {
            Self::owned(tx, owner_id, id)?;
            if update_project(tx, id, patch)? > 0 {
                ttlog(tx, "edit", &format!("project #{}", id), "Project updated")?;
            }
            Self::owned(tx, owner_id, id)
        })
    }

    /// Delete a project together with its todos.
    pub fn delete(pool: &mut DbPool, owner_id: &str, id: i64) -> AppResult<()> {
        pool.with_tx(|tx| {
            let project = Self::owned(tx, owner_id, id)?;
            delete_project(tx, id)?;
            ttlog(tx, "del", &format!("project #{}", id), &project.title)?;
            Ok(())
        })
    }

    pub fn list(pool: &DbPool, owner_id: &str) -> AppResult<Vec<Project>> {
        load_projects(&pool.conn, owner_id)
    }

    /// Project with its todos (newest first).
    pub fn show(pool: &DbPool, owner_id: &str, id: i64) -> AppResult<(Project, Vec<Todo>)> {
        let project = Self::owned(&pool.conn, owner_id, id)?;
        let todos = load_todos(&pool.conn, id, owner_id)?;
        Ok((project, todos))
    }
}
