use super::checklist::ChecklistItem;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Finished,
}

impl ProjectStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Finished => "finished",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ProjectStatus::Pending),
            "in_progress" => Some(ProjectStatus::InProgress),
            "finished" => Some(ProjectStatus::Finished),
            _ => None,
        }
    }

    /// Helper: convert CLI input (any case, `-` or `_` separated)
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&code.trim().to_lowercase().replace('-', "_"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "h" => Some(Priority::High),
            "m" => Some(Priority::Medium),
            "l" => Some(Priority::Low),
            other => Self::from_db_str(other),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,   // ⇔ projects.tags (TEXT, JSON array)
    pub notes: String,
    pub progress: u8,        // ⇔ projects.progress (0..=100, derived from todos)
    pub status: ProjectStatus,
    pub estimation_date: Option<NaiveDate>,
    pub created_at: String,
}

/// Typed input for `project add`.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub notes: String,
    pub estimation_date: Option<NaiveDate>,
}

/// Partial update for `project edit`. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub status: Option<ProjectStatus>,
    pub estimation_date: Option<NaiveDate>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.notes.is_none()
            && self.status.is_none()
            && self.estimation_date.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: i64,
    pub project_id: i64,
    pub owner_id: String,
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: String,
}

impl ChecklistItem for Todo {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn is_done(&self) -> bool {
        self.completed
    }
}

/// Typed input for `todo add`.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub project_id: i64,
    pub title: String,
    pub priority: Priority,
}

/// Partial update for `todo edit` / `todo toggle`.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}
