use crate::config::Config;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::path::expand_tilde;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally compressed.
    /// Returns the path of the file written, or `None` if the user declined
    /// to overwrite an existing file.
    pub fn backup(
        cfg: &Config,
        dest_file: &str,
        compress: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = expand_tilde(dest_file);

        if !src.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists()
            && !confirm(format!(
                "The file '{}' already exists. Overwrite it?",
                dest.display()
            ))
        {
            info("Backup cancelled.");
            return Ok(None);
        }

        fs::copy(src, &dest)?;

        let final_path = if compress {
            let compressed = compress_backup(&dest)?;
            if let Err(e) = fs::remove_file(&dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            compressed
        } else {
            dest
        };

        success(format!("Backup created: {}", final_path.display()));

        let conn = Connection::open(src)?;
        ttlog(
            &conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(Some(final_path))
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rfocuslog.sqlite".to_string())
}

/// Compress a backup into `<name>.zip`.
#[cfg(target_os = "windows")]
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name(path), options)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish()?;

    Ok(zip_path)
}

/// Compress a backup into `<name>.tar.gz`.
#[cfg(not(target_os = "windows"))]
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let gz_path = PathBuf::from(format!("{}.tar.gz", path.display()));
    let file = fs::File::create(&gz_path)?;
    let encoder = GzEncoder::new(file, Compression::default());

    let mut archive = tar::Builder::new(encoder);
    archive.append_path_with_name(path, entry_name(path))?;
    archive.into_inner()?.finish()?;

    Ok(gz_path)
}
