use crate::cli::parser::{Commands, SessionCmd};
use crate::config::Config;
use crate::core::reconcile::{EndMoment, TimeEntry};
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::mode::SessionMode;
use crate::models::session::SessionRecord;
use crate::ui::messages::success;
use crate::utils::formatting::secs2readable;
use crate::utils::time::iso_to_local;

/// Raw widget value as typed; anything non-numeric counts as zero.
fn parse_raw_value(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Session { action } = cmd else {
        return Ok(());
    };

    match action {
        SessionCmd::Save {
            mode,
            value,
            minutes,
            preset,
            task,
            end,
        } => {
            let end_moment = EndMoment::from_input(end.as_deref());
            let raw = parse_raw_value(value);

            let entry = match mode {
                SessionMode::CountUp => TimeEntry::stopwatch(raw, end_moment),
                SessionMode::CountDown => {
                    let target = match preset {
                        Some(p) => f64::from(cfg.preset_minutes(*p)?),
                        None => minutes.unwrap_or(f64::from(cfg.timer_minutes)),
                    };
                    TimeEntry::timer(target, raw, end_moment)
                }
            };

            let mut pool = DbPool::new(&cfg.database)?;
            let record = SessionLogic::save(&mut pool, &cfg.owner, task.as_deref(), &entry)?;
            print_saved(&record);
        }
    }

    Ok(())
}

pub(crate) fn print_saved(record: &SessionRecord) {
    success(format!(
        "Session #{} saved: {} ({})",
        record.id,
        secs2readable(record.duration_seconds),
        record.mode.label()
    ));
    println!("   start : {}", iso_to_local(&record.start_time));
    println!("   end   : {}", iso_to_local(&record.end_time));
}
