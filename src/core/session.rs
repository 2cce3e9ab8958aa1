use crate::core::reconcile::{TimeEntry, reconcile};
use crate::core::task::TaskLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::sessions::insert_session;
use crate::errors::AppResult;
use crate::models::session::SessionRecord;
use crate::utils::formatting::secs2readable;

/// High-level business logic for saving tracked sessions.
pub struct SessionLogic;

impl SessionLogic {
    /// Reconcile `entry` into a session record and store it.
    ///
    /// `task` is a task id or name belonging to `owner_id`; it is resolved
    /// before anything is written so an unknown task stores nothing.
    pub fn save(
        pool: &mut DbPool,
        owner_id: &str,
        task: Option<&str>,
        entry: &TimeEntry,
    ) -> AppResult<SessionRecord> {
        let task_id = match task {
            Some(key) => Some(TaskLogic::resolve(&pool.conn, owner_id, key)?.id),
            None => None,
        };

        let mut record = reconcile(owner_id, task_id, entry);

        let id = pool.with_tx(|tx| {
            let id = insert_session(tx, &record)?;
            ttlog(
                tx,
                "session",
                record.mode.to_db_str(),
                &format!(
                    "Saved session #{} ({}) for task {}",
                    id,
                    secs2readable(record.duration_seconds),
                    task_id.map_or_else(|| "-".to_string(), |t| t.to_string())
                ),
            )?;
            Ok(id)
        })?;

        record.id = id;
        Ok(record)
    }
}
