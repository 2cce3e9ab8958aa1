#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rfocuslog::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rfl() -> Command {
    cargo_bin_cmd!("rfocuslog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rfocuslog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh migrated database opened through the library.
pub fn open_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    DbPool::new(&db_path).expect("open test db")
}

pub fn init_db(db_path: &str) {
    rfl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB with one task and three sessions:
/// - 25 min timer on "Write docs" ending 2025-09-01T10:00:00Z
/// - 90 s stopwatch on "Write docs" ending 2025-09-15T09:00:00Z
/// - 10 min stopwatch without task ending 2025-10-02T12:00:00Z
pub fn init_db_with_sessions(db_path: &str) {
    init_db(db_path);

    rfl()
        .args(["--db", db_path, "task", "add", "Write docs"])
        .assert()
        .success();

    rfl()
        .args([
            "--db",
            db_path,
            "session",
            "save",
            "--mode",
            "timer",
            "--minutes",
            "25",
            "--value",
            "0",
            "--task",
            "Write docs",
            "--end",
            "2025-09-01T10:00:00Z",
        ])
        .assert()
        .success();

    rfl()
        .args([
            "--db",
            db_path,
            "session",
            "save",
            "--mode",
            "stopwatch",
            "--value",
            "90000",
            "--task",
            "Write docs",
            "--end",
            "2025-09-15T09:00:00Z",
        ])
        .assert()
        .success();

    rfl()
        .args([
            "--db",
            db_path,
            "session",
            "save",
            "--mode",
            "stopwatch",
            "--value",
            "600000",
            "--end",
            "2025-10-02T12:00:00Z",
        ])
        .assert()
        .success();
}
