use super::mode::SessionMode;
use serde::Serialize;

/// One persisted work interval.
///
/// `start_time` and `end_time` are ISO 8601 UTC strings with millisecond
/// precision (`2025-09-01T08:00:00.000Z`). A record with `id == 0` has not
/// been written yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub id: i64,
    pub owner_id: String,
    pub task_id: Option<i64>,
    pub mode: SessionMode,
    pub start_time: String,
    pub end_time: String,
    pub duration_seconds: i64,
    pub created_at: String,
}

/// A session row joined with the name of its task, as shown in history views.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub record: SessionRecord,
    pub task_name: Option<String>,
}

impl SessionView {
    pub fn task_label(&self) -> &str {
        self.task_name.as_deref().unwrap_or("No task")
    }
}
