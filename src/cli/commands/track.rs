use crate::cli::commands::session::print_saved;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::context::SessionContext;
use crate::core::session::SessionLogic;
use crate::core::task::TaskLogic;
use crate::core::tracker::{Countdown, STOPWATCH_TICK_MS, Stopwatch};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::mode::SessionMode;
use crate::ui::messages::{info, warning};
use chrono::Utc;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Lines typed on stdin, read on a separate thread. The channel closes on EOF.
fn stdin_lines() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// True once the user pressed Enter (or stdin closed).
fn stop_requested(rx: &Receiver<String>, wait: Duration) -> bool {
    match rx.recv_timeout(wait) {
        Ok(_) | Err(RecvTimeoutError::Disconnected) => true,
        Err(RecvTimeoutError::Timeout) => false,
    }
}

fn redraw(label: &str, value: &str) {
    print!("\r⏱️  {label} {value}   ");
    let _ = io::stdout().flush();
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Track {
        mode,
        task,
        minutes,
        preset,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let mut ctx = SessionContext::new(&cfg.owner, TaskLogic::list(&pool, &cfg.owner)?);

    if let Some(key) = task {
        ctx.select_task(key)?;
    }
    let task_name = ctx.start()?.name.clone();

    info(format!("Tracking '{}'. Press Enter to stop.", task_name));
    let rx = stdin_lines();

    let entry = match mode {
        SessionMode::CountUp => {
            let mut sw = Stopwatch::new();
            sw.start();
            let tick = Duration::from_millis(STOPWATCH_TICK_MS);

            while !stop_requested(&rx, tick) {
                sw.tick();
                redraw("stopwatch", &sw.display());
            }
            sw.stop();
            ctx.stop(Utc::now());
            println!();
            sw.entry(ctx.end_moment().clone())
        }
        SessionMode::CountDown => {
            let target = cfg.timer_length(*preset, *minutes)?;
            let mut timer = Countdown::new(target);
            if !timer.start() {
                return Err(AppError::Other("Timer length must be at least one minute".into()));
            }
            let tick = Duration::from_secs(1);

            redraw("timer", &timer.display());
            while !stop_requested(&rx, tick) {
                timer.tick();
                redraw("timer", &timer.display());
                if timer.is_finished() {
                    println!();
                    info("Time is up!");
                    break;
                }
            }
            timer.stop();
            ctx.stop(Utc::now());
            println!();
            timer.entry(ctx.end_moment().clone())
        }
    };

    let task_key = ctx
        .selected_task()
        .map(|t| t.id.to_string())
        .ok_or(AppError::NoTaskSelected)?;

    let record = SessionLogic::save(&mut pool, ctx.owner_id(), Some(&task_key), &entry)?;
    if record.duration_seconds == 0 {
        warning("Session saved with zero duration.");
    }
    print_saved(&record);

    Ok(())
}
