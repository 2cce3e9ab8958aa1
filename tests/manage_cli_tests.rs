use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, rfl, setup_test_db};

#[test]
fn test_task_add_then_update_by_name() {
    let db_path = setup_test_db("cli_task_upsert");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "task", "add", "Docs", "-s", "outline", "-s", "draft"])
        .assert()
        .success()
        .stdout(contains("Task #1 'Docs' created.").and(contains("outline")));

    rfl()
        .args(["--db", &db_path, "task", "add", "Docs", "-d", "user guide"])
        .assert()
        .success()
        .stdout(contains("Task #1 'Docs' updated.").and(contains("draft")));

    rfl()
        .args(["--db", &db_path, "task", "done", "Docs", "1"])
        .assert()
        .success()
        .stdout(contains("progress: 50%"));

    rfl()
        .args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("Docs").and(contains("1/2")));

    rfl()
        .args(["--db", &db_path, "task", "done", "Docs", "3"])
        .assert()
        .failure()
        .stderr(contains("Subtask #3 not found"));
}

#[test]
fn test_todo_toggle_updates_project_progress() {
    let db_path = setup_test_db("cli_todo_progress");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "project", "add", "Site", "--tags", "web,design"])
        .assert()
        .success()
        .stdout(contains("Project #1 'Site' created."));

    for title in ["mockups", "build"] {
        rfl()
            .args(["--db", &db_path, "todo", "add", "1", title, "-p", "high"])
            .assert()
            .success();
    }

    rfl()
        .args(["--db", &db_path, "todo", "toggle", "1"])
        .assert()
        .success()
        .stdout(
            contains("Todo #1 done.")
                .and(contains("Project #1 progress:"))
                .and(contains("50%")),
        );

    rfl()
        .args(["--db", &db_path, "project", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Site").and(contains(" 50%")).and(contains("mockups")));

    rfl()
        .args(["--db", &db_path, "todo", "del", "2"])
        .assert()
        .success()
        .stdout(contains("100%"));

    rfl()
        .args(["--db", &db_path, "project", "list"])
        .assert()
        .success()
        .stdout(contains("100%").and(contains("web, design")));
}

#[test]
fn test_todo_invalid_priority_and_missing_project() {
    let db_path = setup_test_db("cli_todo_errors");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "todo", "add", "7", "orphan"])
        .assert()
        .failure()
        .stderr(contains("Project not found: 7"));

    rfl()
        .args(["--db", &db_path, "project", "add", "Site"])
        .assert()
        .success();

    rfl()
        .args(["--db", &db_path, "todo", "add", "1", "x", "--priority", "urgent"])
        .assert()
        .failure()
        .stderr(contains("Invalid priority: urgent"));
}

#[test]
fn test_project_edit_and_delete() {
    let db_path = setup_test_db("cli_project_edit");
    init_db(&db_path);

    rfl()
        .args(["--db", &db_path, "project", "add", "Site", "--due", "2025-12-31"])
        .assert()
        .success();

    rfl()
        .args(["--db", &db_path, "project", "edit", "1", "--status", "in_progress"])
        .assert()
        .success()
        .stdout(contains("Project #1 updated."));

    rfl()
        .args(["--db", &db_path, "project", "edit", "1", "--status", "someday"])
        .assert()
        .failure()
        .stderr(contains("Invalid status"));

    rfl()
        .args(["--db", &db_path, "project", "show", "1"])
        .assert()
        .success()
        .stdout(contains("in_progress").and(contains("2025-12-31")));

    rfl()
        .args(["--db", &db_path, "project", "del", "1", "--force"])
        .assert()
        .success();

    rfl()
        .args(["--db", &db_path, "project", "show", "1"])
        .assert()
        .failure()
        .stderr(contains("Project not found: 1"));
}
