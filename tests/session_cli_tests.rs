use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_db_with_sessions, rfl, setup_test_db};

#[test]
fn test_session_save_timer_reports_duration() {
    let db_path = setup_test_db("cli_session_save_timer");
    init_db(&db_path);

    rfl()
        .args([
            "--db",
            &db_path,
            "session",
            "save",
            "--mode",
            "timer",
            "--minutes",
            "25",
            "--value",
            "300",
            "--end",
            "2025-09-01T10:00:00Z",
        ])
        .assert()
        .success()
        .stdout(contains("Session #1 saved: 20m 0s"));
}

#[test]
fn test_session_save_non_numeric_value_is_zero() {
    let db_path = setup_test_db("cli_session_save_garbage");
    init_db(&db_path);

    rfl()
        .args([
            "--db",
            &db_path,
            "session",
            "save",
            "--mode",
            "stopwatch",
            "--value",
            "abc",
            "--end",
            "garbage",
        ])
        .assert()
        .success()
        .stdout(contains("saved: 0m 0s"));
}

#[test]
fn test_session_save_unknown_task_fails() {
    let db_path = setup_test_db("cli_session_save_unknown_task");
    init_db(&db_path);

    rfl()
        .args([
            "--db", &db_path, "session", "save", "--mode", "stopwatch", "--value", "42",
            "--task", "ghost",
        ])
        .assert()
        .failure()
        .stderr(contains("Task not found: ghost"));
}

#[test]
fn test_session_save_timer_from_preset() {
    let db_path = setup_test_db("cli_session_save_preset");
    init_db(&db_path);

    rfl()
        .args([
            "--db", &db_path, "session", "save", "--mode", "timer", "--preset", "15", "--value",
            "0",
        ])
        .assert()
        .success()
        .stdout(contains("saved: 15m 0s").and(contains("(Timer)")));
}

#[test]
fn test_session_save_unknown_preset_fails() {
    let db_path = setup_test_db("cli_session_save_bad_preset");
    init_db(&db_path);

    rfl()
        .args([
            "--db", &db_path, "session", "save", "--mode", "timer", "--preset", "7", "--value",
            "0",
        ])
        .assert()
        .failure()
        .stderr(contains("Configuration error").and(contains("not a timer preset")));

    rfl()
        .args([
            "--db", &db_path, "session", "save", "--mode", "timer", "--preset", "15",
            "--minutes", "20", "--value", "0",
        ])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn test_huge_values_keep_summary_working() {
    let db_path = setup_test_db("cli_session_save_huge");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "task", "add", "Marathon"])
        .assert()
        .success();

    for mode in ["stopwatch", "timer"] {
        rfl()
            .args([
                "--db", &db_path, "session", "save", "--mode", mode, "--value", "1e300",
                "--minutes", "1e300", "--task", "Marathon",
            ])
            .assert()
            .success()
            .stdout(contains("saved:"));
    }

    rfl()
        .args(["--db", &db_path, "sessions", "summary"])
        .assert()
        .success()
        .stdout(contains("Marathon"));

    rfl()
        .args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("Marathon"));
}

#[test]
fn test_sessions_list_shows_tasks_and_durations() {
    let db_path = setup_test_db("cli_sessions_list");
    init_db_with_sessions(&db_path);

    rfl()
        .args(["--db", &db_path, "sessions", "list"])
        .assert()
        .success()
        .stdout(
            contains("Write docs")
                .and(contains("No task"))
                .and(contains("25m 0s"))
                .and(contains("1m 30s"))
                .and(contains("10m 0s"))
                .and(contains("Page 1 of 1 (3 sessions)")),
        );
}

#[test]
fn test_sessions_list_page_out_of_range() {
    let db_path = setup_test_db("cli_sessions_list_bad_page");
    init_db_with_sessions(&db_path);

    rfl()
        .args(["--db", &db_path, "sessions", "list", "--page", "2"])
        .assert()
        .failure()
        .stderr(contains("Invalid page 2"));
}

#[test]
fn test_sessions_summary_groups_by_task() {
    let db_path = setup_test_db("cli_sessions_summary");
    init_db_with_sessions(&db_path);

    rfl()
        .args(["--db", &db_path, "sessions", "summary"])
        .assert()
        .success()
        .stdout(
            contains("Write docs")
                .and(contains("0.44 h"))
                .and(contains("Unknown"))
                .and(contains("0.17 h")),
        );
}

#[test]
fn test_track_without_task_fails() {
    let db_path = setup_test_db("cli_track_no_task");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "track", "stopwatch"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(contains("No task selected"));
}

#[test]
fn test_track_stopwatch_stops_on_enter() {
    let db_path = setup_test_db("cli_track_stopwatch");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "task", "add", "Focus"])
        .assert()
        .success();

    rfl()
        .args(["--db", &db_path, "track", "stopwatch", "--task", "Focus"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(contains("Tracking 'Focus'").and(contains("Session #1 saved")));

    rfl()
        .args(["--db", &db_path, "sessions", "list"])
        .assert()
        .success()
        .stdout(contains("Focus").and(contains("stopwatch")));
}

#[test]
fn test_track_timer_stopped_early() {
    let db_path = setup_test_db("cli_track_timer");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "task", "add", "Focus"])
        .assert()
        .success();

    rfl()
        .args([
            "--db", &db_path, "track", "timer", "--task", "Focus", "--minutes", "1",
        ])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(contains("(Timer)"));
}
