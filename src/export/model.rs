use crate::models::session::SessionView;
use serde::Serialize;

/// Flat session row written by CSV and JSON exports.
#[derive(Serialize, Clone, Debug)]
pub struct SessionExport {
    pub id: i64,
    pub task: String,
    #[serde(rename = "type")]
    pub mode: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_seconds: i64,
    pub created_at: String,
}

impl From<&SessionView> for SessionExport {
    fn from(v: &SessionView) -> Self {
        Self {
            id: v.record.id,
            task: v.task_label().to_string(),
            mode: v.record.mode.to_db_str().to_string(),
            start_time: v.record.start_time.clone(),
            end_time: v.record.end_time.clone(),
            duration_seconds: v.record.duration_seconds,
            created_at: v.record.created_at.clone(),
        }
    }
}
