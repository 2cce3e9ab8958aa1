//! Keeps older configuration files up to date: fields added in later
//! releases are reported by `config --check` and filled in by
//! `config --migrate` without touching the values the user already set.

use super::{
    default_owner, default_page_size, default_timer_minutes, default_timer_presets,
};
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every optional key with the value a fresh `init` would write.
fn defaults() -> Vec<(&'static str, Value)> {
    vec![
        ("owner", Value::String(default_owner())),
        ("timer_minutes", Value::from(default_timer_minutes())),
        (
            "timer_presets",
            Value::Sequence(
                default_timer_presets()
                    .into_iter()
                    .map(Value::from)
                    .collect(),
            ),
        ),
        ("page_size", Value::from(default_page_size() as u64)),
    ]
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys missing from the file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;

    let mut missing: Vec<&'static str> = defaults()
        .into_iter()
        .filter(|(key, _)| !map.contains_key(*key))
        .map(|(key, _)| key)
        .collect();

    if !map.contains_key("database") {
        missing.insert(0, "database");
    }

    Ok(missing)
}

/// Add the missing keys with their defaults and rewrite the file.
/// Returns the keys that were added; the file is not rewritten if none were.
pub fn migrate_config(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let mut added = Vec::new();

    if !map.contains_key("database") {
        map.insert(
            Value::from("database"),
            Value::String(super::Config::database_file().to_string_lossy().to_string()),
        );
        added.push("database");
    }

    for (key, value) in defaults() {
        if !map.contains_key(key) {
            map.insert(Value::from(key), value);
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
