use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Open the file in `editor` (or $EDITOR / $VISUAL / platform default),
    /// falling back to the default editor if the requested one fails.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let fallback = default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        if matches!(Command::new(&requested).arg(path).status(), Ok(s) if s.success()) {
            success(format!("Configuration file edited using '{}'", requested));
            return Ok(());
        }

        warning(format!(
            "Editor '{}' not available, falling back to '{}'",
            requested, fallback
        ));

        match Command::new(&fallback).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using fallback '{}'", fallback));
                Ok(())
            }
            _ => {
                error(format!("Failed to edit configuration file using '{}'", fallback));
                Err(AppError::Config(format!("no usable editor for {}", path.display())))
            }
        }
    }
}
