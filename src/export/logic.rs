use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::sessions::load_sessions;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::SessionExport;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::range::parse_range;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the owner's sessions, oldest first.
    ///
    /// `range` is `None`, `"all"` or anything [`parse_range`] accepts.
    /// Returns the number of sessions written.
    pub fn export(
        pool: &DbPool,
        owner_id: &str,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let views = load_sessions(&pool.conn, owner_id, bounds)?;

        if views.is_empty() {
            warning("No sessions found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<SessionExport> = views.iter().rev().map(SessionExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} session(s) as {}", rows.len(), format.as_str()),
        )?;

        Ok(rows.len())
    }
}
