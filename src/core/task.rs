use crate::core::progress::compute_progress;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::tasks::{
    find_task_by_name, insert_task, load_task, load_tasks, set_task_status, update_task_details,
};
use crate::errors::{AppError, AppResult};
use crate::models::task::{Subtask, Task, TaskInput, TaskStatus, checklist_of};
use rusqlite::Connection;

pub struct TaskLogic;

fn subtask_progress(subtasks: &[Subtask]) -> u8 {
    compute_progress(&checklist_of(subtasks))
}

impl TaskLogic {
    /// Find a task of `owner_id` by numeric id or by exact name.
    pub fn resolve(conn: &Connection, owner_id: &str, key: &str) -> AppResult<Task> {
        let key = key.trim();

        if let Ok(id) = key.parse::<i64>()
            && let Some(task) = load_task(conn, id)?
            && task.owner_id == owner_id
        {
            return Ok(task);
        }

        find_task_by_name(conn, owner_id, key)?
            .ok_or_else(|| AppError::TaskNotFound(key.to_string()))
    }

    /// Create the task, or update description/subtasks of the existing task
    /// with the same name. Returns the stored task and whether it was created.
    pub fn add_or_update(
        pool: &mut DbPool,
        owner_id: &str,
        input: &TaskInput,
    ) -> AppResult<(Task, bool)> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Other("Task name cannot be empty".into()));
        }

        pool.with_tx(|tx| {
            let (id, created) = match find_task_by_name(tx, owner_id, name)? {
                Some(existing) => {
                    let description = input
                        .description
                        .as_deref()
                        .or(existing.description.as_deref());
                    let subtasks = input.subtasks.as_ref().unwrap_or(&existing.subtasks);

                    update_task_details(
                        tx,
                        existing.id,
                        description,
                        subtasks,
                        subtask_progress(subtasks),
                    )?;
                    ttlog(tx, "edit", &format!("task #{}", existing.id), name)?;
                    (existing.id, false)
                }
                None => {
                    let subtasks = input.subtasks.clone().unwrap_or_default();
                    let id = insert_task(
                        tx,
                        owner_id,
                        name,
                        input.description.as_deref(),
                        &subtasks,
                        subtask_progress(&subtasks),
                    )?;
                    ttlog(tx, "add", &format!("task #{}", id), name)?;
                    (id, true)
                }
            };

            let task = load_task(tx, id)?.ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;
            Ok((task, created))
        })
    }

    pub fn list(pool: &DbPool, owner_id: &str) -> AppResult<Vec<Task>> {
        load_tasks(&pool.conn, owner_id)
    }

    /// Flip the done flag of subtask `position` (1-based) and refresh progress.
    pub fn toggle_subtask(
        pool: &mut DbPool,
        owner_id: &str,
        key: &str,
        position: usize,
    ) -> AppResult<Task> {
        pool.with_tx(|tx| {
            let mut task = Self::resolve(tx, owner_id, key)?;

            let subtask = position
                .checked_sub(1)
                .and_then(|i| task.subtasks.get_mut(i))
                .ok_or_else(|| AppError::SubtaskNotFound(task.name.clone(), position))?;
            subtask.is_completed = !subtask.is_completed;

            task.progress = subtask_progress(&task.subtasks);
            update_task_details(
                tx,
                task.id,
                task.description.as_deref(),
                &task.subtasks,
                task.progress,
            )?;
            ttlog(
                tx,
                "edit",
                &format!("task #{}", task.id),
                &format!("Toggled subtask {} → progress {}%", position, task.progress),
            )?;

            Ok(task)
        })
    }

    /// Mark a task completed, or active again with `reopen`.
    pub fn set_status(
        pool: &mut DbPool,
        owner_id: &str,
        key: &str,
        reopen: bool,
    ) -> AppResult<Task> {
        pool.with_tx(|tx| {
            let mut task = Self::resolve(tx, owner_id, key)?;
            task.status = if reopen {
                TaskStatus::Active
            } else {
                TaskStatus::Completed
            };
            set_task_status(tx, task.id, task.status)?;
            ttlog(
                tx,
                "edit",
                &format!("task #{}", task.id),
                &format!("Status → {}", task.status.to_db_str()),
            )?;
            Ok(task)
        })
    }
}
