use chrono::{TimeZone, Utc};
use rfocuslog::context::SessionContext;
use rfocuslog::core::reconcile::{EndMoment, duration_seconds};
use rfocuslog::core::tracker::{Countdown, Stopwatch};
use rfocuslog::errors::AppError;
use rfocuslog::models::mode::SessionMode;
use rfocuslog::models::task::{Task, TaskStatus};

fn task(id: i64, name: &str) -> Task {
    Task {
        id,
        owner_id: "alice".into(),
        name: name.into(),
        description: None,
        status: TaskStatus::Active,
        subtasks: vec![],
        progress: 0,
        total_duration: 0,
        created_at: "2025-09-01T08:00:00Z".into(),
        updated_at: "2025-09-01T08:00:00Z".into(),
    }
}

#[test]
fn test_stopwatch_counts_in_100ms_steps() {
    let mut sw = Stopwatch::new();
    sw.tick();
    assert_eq!(sw.elapsed_ms(), 0, "stopped stopwatch must not advance");

    sw.start();
    for _ in 0..25 {
        sw.tick();
    }
    assert_eq!(sw.elapsed_ms(), 2500);
    assert_eq!(sw.display(), "0:02:5");

    sw.stop();
    sw.tick();
    assert_eq!(sw.elapsed_ms(), 2500);

    let entry = sw.entry(EndMoment::Absent);
    assert_eq!(entry.mode, SessionMode::CountUp);
    assert_eq!(duration_seconds(&entry), 3);

    sw.reset();
    assert_eq!(sw.elapsed_ms(), 0);
}

#[test]
fn test_countdown_runs_to_zero_and_stops() {
    let mut timer = Countdown::new(1);
    assert_eq!(timer.display(), "1:00");
    assert!(timer.start());

    for _ in 0..59 {
        timer.tick();
    }
    assert!(timer.is_running());
    assert_eq!(timer.display(), "0:01");

    timer.tick();
    assert!(timer.is_finished());
    assert!(!timer.is_running());

    let entry = timer.entry(EndMoment::Absent);
    assert_eq!(entry.mode, SessionMode::CountDown);
    assert_eq!(duration_seconds(&entry), 60);
}

#[test]
fn test_countdown_partial_run() {
    let mut timer = Countdown::new(25);
    timer.start();
    for _ in 0..90 {
        timer.tick();
    }
    timer.stop();
    assert_eq!(timer.remaining_secs(), 1410);
    assert_eq!(duration_seconds(&timer.entry(EndMoment::Absent)), 90);

    timer.set(5);
    assert_eq!(timer.target_minutes(), 5);
    assert_eq!(timer.remaining_secs(), 300);
    assert!(!timer.is_running());
}

#[test]
fn test_zero_minute_countdown_does_not_start() {
    let mut timer = Countdown::new(0);
    assert!(!timer.start());
    assert!(timer.is_finished());
}

#[test]
fn test_context_requires_selected_task() {
    let mut ctx = SessionContext::new("alice", vec![task(1, "Write docs"), task(2, "Review")]);
    assert!(matches!(ctx.start(), Err(AppError::NoTaskSelected)));
    assert!(!ctx.is_running());
    assert_eq!(ctx.end_moment(), &EndMoment::Absent);
}

#[test]
fn test_context_select_start_stop() {
    let mut ctx = SessionContext::new("alice", vec![task(1, "Write docs"), task(2, "Review")]);

    assert_eq!(ctx.select_task("Review").unwrap().id, 2);
    assert_eq!(ctx.select_task("1").unwrap().name, "Write docs");
    assert!(matches!(
        ctx.select_task("missing"),
        Err(AppError::TaskNotFound(_))
    ));
    // a failed selection keeps the previous one
    assert_eq!(ctx.selected_task().unwrap().id, 1);

    ctx.start().unwrap();
    assert!(ctx.is_running());

    let at = Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap();
    ctx.stop(at);
    assert!(!ctx.is_running());
    assert_eq!(ctx.end_moment(), &EndMoment::At(at));
    assert_eq!(ctx.owner_id(), "alice");
    assert_eq!(ctx.tasks().len(), 2);
}
