//! Session-selection state shared by the tracking commands.
//!
//! One value is created per command invocation and passed by reference to
//! whatever needs to read or change the current task or running flag.

use crate::core::reconcile::EndMoment;
use crate::errors::{AppError, AppResult};
use crate::models::task::Task;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct SessionContext {
    owner_id: String,
    tasks: Vec<Task>,
    selected: Option<usize>,
    running: bool,
    end_moment: EndMoment,
}

impl SessionContext {
    pub fn new(owner_id: &str, tasks: Vec<Task>) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            tasks,
            selected: None,
            running: false,
            end_moment: EndMoment::Absent,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Select a task by id or by exact name.
    pub fn select_task(&mut self, key: &str) -> AppResult<&Task> {
        let key = key.trim();
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id.to_string() == key || t.name == key)
            .ok_or_else(|| AppError::TaskNotFound(key.to_string()))?;

        self.selected = Some(idx);
        Ok(&self.tasks[idx])
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|i| self.tasks.get(i))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Mark the session as running. A task must be selected first.
    pub fn start(&mut self) -> AppResult<&Task> {
        let idx = self.selected.ok_or(AppError::NoTaskSelected)?;
        self.running = true;
        self.end_moment = EndMoment::Absent;
        Ok(&self.tasks[idx])
    }

    /// Stop and remember when.
    pub fn stop(&mut self, at: DateTime<Utc>) {
        self.running = false;
        self.end_moment = EndMoment::At(at);
    }

    /// End moment recorded by the last `stop`, `Absent` if never stopped.
    pub fn end_moment(&self) -> &EndMoment {
        &self.end_moment
    }
}
