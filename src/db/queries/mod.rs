//! Row-level access, one module per table.

pub mod projects;
pub mod sessions;
pub mod tasks;
pub mod todos;

use crate::errors::AppError;
use rusqlite::types::Type;

/// Wrap a domain parsing failure so it can be returned from a row mapper.
pub(crate) fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

/// Progress stored as INTEGER; out-of-range values are clamped.
pub(crate) fn progress_from_db(v: i64) -> u8 {
    v.clamp(0, 100) as u8
}
