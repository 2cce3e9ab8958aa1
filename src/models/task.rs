use super::checklist::ChecklistItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskStatus {
    Active,
    Completed,
}

impl TaskStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(TaskStatus::Active),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Subtasks live inside the task row as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub title: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

impl Subtask {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            is_completed: false,
        }
    }
}

/// Subtask addressed by its 1-based position inside the task.
pub struct IndexedSubtask<'a> {
    pub position: usize,
    pub subtask: &'a Subtask,
}

impl ChecklistItem for IndexedSubtask<'_> {
    fn id(&self) -> i64 {
        self.position as i64
    }

    fn label(&self) -> &str {
        &self.subtask.title
    }

    fn is_done(&self) -> bool {
        self.subtask.is_completed
    }
}

/// Subtasks as checklist items, numbered from 1.
pub fn checklist_of(subtasks: &[Subtask]) -> Vec<IndexedSubtask<'_>> {
    subtasks
        .iter()
        .enumerate()
        .map(|(i, subtask)| IndexedSubtask {
            position: i + 1,
            subtask,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub subtasks: Vec<Subtask>,
    pub progress: u8,
    pub total_duration: i64, // seconds, sum of saved sessions
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    pub fn checklist(&self) -> Vec<IndexedSubtask<'_>> {
        checklist_of(&self.subtasks)
    }
}

/// Typed input for `task add` (create or update by name).
#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub name: String,
    pub description: Option<String>,
    pub subtasks: Option<Vec<Subtask>>,
}
