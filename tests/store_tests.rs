mod common;
use common::open_pool;
use rfocuslog::core::history::{HistoryLogic, UNKNOWN_TASK, page_count, task_totals};
use rfocuslog::core::project::ProjectLogic;
use rfocuslog::core::reconcile::{EndMoment, TimeEntry};
use rfocuslog::core::session::SessionLogic;
use rfocuslog::core::task::TaskLogic;
use rfocuslog::core::todo::TodoLogic;
use rfocuslog::db::log::load_log;
use rfocuslog::db::pool::DbPool;
use rfocuslog::db::queries::sessions::{count_sessions, load_session};
use rfocuslog::errors::AppError;
use rfocuslog::models::project::{NewProject, NewTodo, Priority, ProjectPatch, ProjectStatus};
use rfocuslog::models::mode::SessionMode;
use rfocuslog::models::session::{SessionRecord, SessionView};
use rfocuslog::models::task::{Subtask, TaskInput, TaskStatus};

fn ends_at(iso: &str) -> EndMoment {
    EndMoment::Text(iso.to_string())
}

fn task_input(name: &str, subtasks: &[&str]) -> TaskInput {
    TaskInput {
        name: name.into(),
        description: None,
        subtasks: Some(subtasks.iter().map(|s| Subtask::new(s)).collect()),
    }
}

fn save_stopwatch(pool: &mut DbPool, task: Option<&str>, secs: f64) {
    SessionLogic::save(pool, "alice", task, &TimeEntry::stopwatch(secs, EndMoment::Absent))
        .unwrap();
}

fn new_todo(project_id: i64, title: &str) -> NewTodo {
    NewTodo {
        project_id,
        title: title.into(),
        priority: Priority::Medium,
    }
}

#[test]
fn test_save_session_persists_reconciled_record() {
    let mut pool = open_pool("store_save_session");
    let (task, _) =
        TaskLogic::add_or_update(&mut pool, "alice", &task_input("Write docs", &[])).unwrap();

    let entry = TimeEntry::timer(25.0, 300.0, ends_at("2025-09-01T10:00:00Z"));
    let rec = SessionLogic::save(&mut pool, "alice", Some("Write docs"), &entry).unwrap();

    assert!(rec.id > 0);
    assert_eq!(rec.task_id, Some(task.id));
    assert_eq!(rec.duration_seconds, 1200);
    assert_eq!(rec.start_time, "2025-09-01T09:40:00.000Z");
    assert_eq!(rec.end_time, "2025-09-01T10:00:00.000Z");

    let stored = load_session(&pool.conn, rec.id).unwrap().expect("row exists");
    assert_eq!(stored, rec);

    // the task keeps a running total
    let task = TaskLogic::resolve(&pool.conn, "alice", "Write docs").unwrap();
    assert_eq!(task.total_duration, 1200);

    let log = load_log(&pool.conn).unwrap();
    assert!(log.iter().any(|r| r.operation == "session"));
}

#[test]
fn test_save_zero_duration_session_is_still_stored() {
    let mut pool = open_pool("store_zero_session");
    let entry = TimeEntry::stopwatch(0.0, EndMoment::Absent);
    let rec = SessionLogic::save(&mut pool, "alice", None, &entry).unwrap();

    assert_eq!(rec.duration_seconds, 0);
    assert_eq!(rec.start_time, rec.end_time);
    assert_eq!(count_sessions(&pool.conn, "alice").unwrap(), 1);
}

#[test]
fn test_save_with_unknown_task_stores_nothing() {
    let mut pool = open_pool("store_unknown_task");
    let entry = TimeEntry::stopwatch(60.0, EndMoment::Absent);

    let err = SessionLogic::save(&mut pool, "alice", Some("nope"), &entry).unwrap_err();
    assert!(matches!(err, AppError::TaskNotFound(_)));
    assert_eq!(count_sessions(&pool.conn, "alice").unwrap(), 0);
}

#[test]
fn test_task_of_other_owner_is_not_found() {
    let mut pool = open_pool("store_task_owner");
    let (task, _) =
        TaskLogic::add_or_update(&mut pool, "alice", &task_input("Secret", &[])).unwrap();

    let err = TaskLogic::resolve(&pool.conn, "bob", &task.id.to_string()).unwrap_err();
    assert!(matches!(err, AppError::TaskNotFound(_)));
}

#[test]
fn test_add_or_update_task_by_name() {
    let mut pool = open_pool("store_task_upsert");

    let (first, created) =
        TaskLogic::add_or_update(&mut pool, "alice", &task_input("Refactor", &["parse", "emit"]))
            .unwrap();
    assert!(created);
    assert_eq!(first.progress, 0);
    assert_eq!(first.subtasks.len(), 2);

    let update = TaskInput {
        name: "Refactor".into(),
        description: Some("split modules".into()),
        subtasks: None,
    };
    let (second, created) = TaskLogic::add_or_update(&mut pool, "alice", &update).unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.description.as_deref(), Some("split modules"));
    assert_eq!(second.subtasks, first.subtasks);

    assert_eq!(TaskLogic::list(&pool, "alice").unwrap().len(), 1);

    let empty = task_input("   ", &[]);
    assert!(TaskLogic::add_or_update(&mut pool, "alice", &empty).is_err());
}

#[test]
fn test_toggle_subtask_updates_progress() {
    let mut pool = open_pool("store_task_subtasks");
    let input = task_input("Release", &["tag", "notes", "publish"]);
    TaskLogic::add_or_update(&mut pool, "alice", &input).unwrap();

    let task = TaskLogic::toggle_subtask(&mut pool, "alice", "Release", 2).unwrap();
    assert!(task.subtasks[1].is_completed);
    assert_eq!(task.progress, 33);

    let task = TaskLogic::toggle_subtask(&mut pool, "alice", "Release", 2).unwrap();
    assert_eq!(task.progress, 0);

    for pos in [0, 4] {
        let err = TaskLogic::toggle_subtask(&mut pool, "alice", "Release", pos).unwrap_err();
        assert!(matches!(err, AppError::SubtaskNotFound(_, p) if p == pos));
    }

    let task = TaskLogic::set_status(&mut pool, "alice", "Release", false).unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    let task = TaskLogic::set_status(&mut pool, "alice", "Release", true).unwrap();
    assert_eq!(task.status, TaskStatus::Active);
}

#[test]
fn test_todo_changes_write_project_progress() {
    let mut pool = open_pool("store_todo_progress");
    let project = ProjectLogic::create(
        &mut pool,
        "alice",
        &NewProject {
            title: "Website".into(),
            ..NewProject::default()
        },
    )
    .unwrap();
    assert_eq!(project.progress, 0);

    let a = TodoLogic::add(&mut pool, "alice", &new_todo(project.id, "design")).unwrap();
    assert!(!a.progress_changed);
    let b = TodoLogic::add(&mut pool, "alice", &new_todo(project.id, "build")).unwrap();
    let c = TodoLogic::add(&mut pool, "alice", &new_todo(project.id, "ship")).unwrap();

    let change = TodoLogic::toggle(&mut pool, "alice", a.todo.id).unwrap();
    assert!(change.todo.completed);
    assert!(change.progress_changed);
    assert_eq!(change.progress, 33);

    let change = TodoLogic::delete(&mut pool, "alice", c.todo.id).unwrap();
    assert_eq!(change.progress, 50);

    let change = TodoLogic::toggle(&mut pool, "alice", b.todo.id).unwrap();
    assert_eq!(change.progress, 100);

    let (stored, todos) = ProjectLogic::show(&pool, "alice", project.id).unwrap();
    assert_eq!(stored.progress, 100);
    assert_eq!(todos.len(), 2);

    // re-saving the same state leaves progress alone
    let patch = rfocuslog::models::project::TodoPatch {
        title: Some("build it".into()),
        ..Default::default()
    };
    let change = TodoLogic::update(&mut pool, "alice", b.todo.id, &patch).unwrap();
    assert!(!change.progress_changed);
    assert_eq!(change.todo.title, "build it");
}

#[test]
fn test_project_update_delete_and_ownership() {
    let mut pool = open_pool("store_project_crud");
    let project = ProjectLogic::create(
        &mut pool,
        "alice",
        &NewProject {
            title: "CLI".into(),
            tags: vec!["rust".into(), "tools".into()],
            ..NewProject::default()
        },
    )
    .unwrap();
    assert_eq!(project.tags, vec!["rust", "tools"]);
    assert_eq!(project.status, ProjectStatus::Pending);

    let patch = ProjectPatch {
        status: Some(ProjectStatus::InProgress),
        notes: Some("weekly".into()),
        ..ProjectPatch::default()
    };
    let updated = ProjectLogic::update(&mut pool, "alice", project.id, &patch).unwrap();
    assert_eq!(updated.status, ProjectStatus::InProgress);
    assert_eq!(updated.notes, "weekly");
    assert_eq!(updated.title, "CLI");

    let err = ProjectLogic::show(&pool, "bob", project.id).unwrap_err();
    assert!(matches!(err, AppError::ProjectNotFound(id) if id == project.id));
    let err = TodoLogic::add(&mut pool, "bob", &new_todo(project.id, "x")).unwrap_err();
    assert!(matches!(err, AppError::ProjectNotFound(_)));

    let todo = TodoLogic::add(&mut pool, "alice", &new_todo(project.id, "x")).unwrap();
    ProjectLogic::delete(&mut pool, "alice", project.id).unwrap();

    assert!(ProjectLogic::list(&pool, "alice").unwrap().is_empty());
    let err = TodoLogic::toggle(&mut pool, "alice", todo.todo.id).unwrap_err();
    assert!(matches!(err, AppError::TodoNotFound(_)));
}

#[test]
fn test_history_pages_newest_first() {
    let mut pool = open_pool("store_history_pages");

    for hour in 0..12 {
        let entry = TimeEntry::stopwatch(60.0, ends_at(&format!("2025-09-01T{:02}:30:00Z", hour)));
        SessionLogic::save(&mut pool, "alice", None, &entry).unwrap();
    }
    // another owner's session never shows up
    SessionLogic::save(&mut pool, "bob", None, &TimeEntry::stopwatch(5.0, EndMoment::Absent))
        .unwrap();

    let first = HistoryLogic::page(&pool, "alice", 1, 5).unwrap();
    assert_eq!(first.total, 12);
    assert_eq!(first.pages, 3);
    assert_eq!(first.sessions.len(), 5);
    assert_eq!(first.sessions[0].record.end_time, "2025-09-01T11:30:00.000Z");

    let last = HistoryLogic::page(&pool, "alice", 3, 5).unwrap();
    assert_eq!(last.sessions.len(), 2);
    assert_eq!(last.sessions[1].record.end_time, "2025-09-01T00:30:00.000Z");

    let err = HistoryLogic::page(&pool, "alice", 4, 5).unwrap_err();
    assert!(matches!(err, AppError::InvalidPage { page: 4, pages: 3 }));
    assert!(HistoryLogic::page(&pool, "alice", 0, 5).is_err());

    assert_eq!(page_count(0, 10), 1);
    assert_eq!(page_count(10, 10), 1);
    assert_eq!(page_count(11, 10), 2);
}

#[test]
fn test_history_totals_per_task() {
    let mut pool = open_pool("store_history_totals");
    TaskLogic::add_or_update(&mut pool, "alice", &task_input("Docs", &[])).unwrap();
    TaskLogic::add_or_update(&mut pool, "alice", &task_input("Code", &[])).unwrap();

    save_stopwatch(&mut pool, Some("Docs"), 900.0);
    save_stopwatch(&mut pool, Some("Docs"), 900.0);
    save_stopwatch(&mut pool, Some("Code"), 5_400_000.0);
    save_stopwatch(&mut pool, None, 360.0);

    let totals = HistoryLogic::totals(&pool, "alice").unwrap();
    let names: Vec<&str> = totals.iter().map(|t| t.task.as_str()).collect();
    assert_eq!(names, vec!["Code", "Docs", UNKNOWN_TASK]);

    assert_eq!(totals[0].seconds, 5400);
    assert_eq!(totals[0].hours, 1.5);
    assert_eq!(totals[1].seconds, 1800);
    assert_eq!(totals[1].hours, 0.5);
    assert_eq!(totals[2].hours, 0.1);
}

fn view(task: Option<&str>, duration_seconds: i64) -> SessionView {
    SessionView {
        record: SessionRecord {
            id: 1,
            owner_id: "alice".into(),
            task_id: None,
            mode: SessionMode::CountUp,
            start_time: "1970-01-01T00:00:00.000Z".into(),
            end_time: "2025-09-01T12:00:00.000Z".into(),
            duration_seconds,
            created_at: "2025-09-01T12:00:00+00:00".into(),
        },
        task_name: task.map(String::from),
    }
}

#[test]
fn test_task_totals_saturate_instead_of_overflowing() {
    let sessions = [
        view(Some("Huge"), i64::MAX),
        view(Some("Huge"), i64::MAX),
        view(None, 60),
    ];
    let totals = task_totals(&sessions);

    assert_eq!(totals[0].task, "Huge");
    assert_eq!(totals[0].seconds, i64::MAX);
    assert_eq!(totals[1].task, UNKNOWN_TASK);
    assert_eq!(totals[1].seconds, 60);
}

#[test]
fn test_huge_raw_value_is_stored_and_summed() {
    let mut pool = open_pool("store_huge_raw_value");
    TaskLogic::add_or_update(&mut pool, "alice", &task_input("Huge", &[])).unwrap();

    let end = ends_at("2025-09-01T12:00:00Z");
    for _ in 0..2 {
        let entry = TimeEntry::stopwatch(1e300, end.clone());
        SessionLogic::save(&mut pool, "alice", Some("Huge"), &entry).unwrap();
    }

    let totals = HistoryLogic::totals(&pool, "alice").unwrap();
    assert_eq!(totals[0].seconds, 2 * 1_756_728_000);

    let task = TaskLogic::list(&pool, "alice").unwrap().remove(0);
    assert_eq!(task.total_duration, 2 * 1_756_728_000);
}
