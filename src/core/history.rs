//! Session history views: pagination and per-task totals.

use crate::db::pool::DbPool;
use crate::db::queries::sessions::{count_sessions, load_session_page, load_sessions};
use crate::errors::{AppError, AppResult};
use crate::models::session::SessionView;
use crate::utils::formatting::secs2hours;
use std::collections::BTreeMap;

/// Label for sessions that have no task.
pub const UNKNOWN_TASK: &str = "Unknown";

#[derive(Debug)]
pub struct SessionPage {
    pub sessions: Vec<SessionView>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

/// Number of pages needed for `total` rows (at least one).
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskTotal {
    pub task: String,
    pub seconds: i64,
    pub hours: f64,
}

/// Sum durations per task name, largest first (ties by name).
pub fn task_totals(sessions: &[SessionView]) -> Vec<TaskTotal> {
    let mut acc: BTreeMap<&str, i64> = BTreeMap::new();
    for s in sessions {
        let name = s.task_name.as_deref().unwrap_or(UNKNOWN_TASK);
        let total = acc.entry(name).or_insert(0);
        *total = total.saturating_add(s.record.duration_seconds);
    }

    let mut totals: Vec<TaskTotal> = acc
        .into_iter()
        .map(|(task, seconds)| TaskTotal {
            task: task.to_string(),
            seconds,
            hours: secs2hours(seconds),
        })
        .collect();

    totals.sort_by(|a, b| b.seconds.cmp(&a.seconds).then_with(|| a.task.cmp(&b.task)));
    totals
}

pub struct HistoryLogic;

impl HistoryLogic {
    /// Page `page` (1-based) of the owner's sessions, newest first.
    pub fn page(
        pool: &DbPool,
        owner_id: &str,
        page: usize,
        page_size: usize,
    ) -> AppResult<SessionPage> {
        let page_size = page_size.max(1);
        let total = count_sessions(&pool.conn, owner_id)?;
        let pages = page_count(total, page_size);

        if page == 0 || page > pages {
            return Err(AppError::InvalidPage { page, pages });
        }

        let sessions = load_session_page(&pool.conn, owner_id, page_size, (page - 1) * page_size)?;

        Ok(SessionPage {
            sessions,
            page,
            pages,
            total,
        })
    }

    pub fn totals(pool: &DbPool, owner_id: &str) -> AppResult<Vec<TaskTotal>> {
        let sessions = load_sessions(&pool.conn, owner_id, None)?;
        Ok(task_totals(&sessions))
    }
}
