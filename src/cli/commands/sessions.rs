use crate::cli::parser::{Commands, SessionsCmd};
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::formatting::{bar, secs2readable};
use crate::utils::table::Table;
use crate::utils::time::iso_to_local;

const BAR_WIDTH: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Sessions { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        SessionsCmd::List { page } => {
            let page = HistoryLogic::page(&pool, &cfg.owner, *page, cfg.page_size)?;

            if page.total == 0 {
                info("No sessions saved yet.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Task", "Type", "Start", "End", "Duration"]);
            for s in &page.sessions {
                table.add_row(vec![
                    s.record.id.to_string(),
                    s.task_label().to_string(),
                    s.record.mode.to_db_str().to_string(),
                    iso_to_local(&s.record.start_time),
                    iso_to_local(&s.record.end_time),
                    secs2readable(s.record.duration_seconds),
                ]);
            }

            print!("{}", table.render());
            println!(
                "{}Page {} of {} ({} sessions){}",
                GREY, page.page, page.pages, page.total, RESET
            );
        }

        SessionsCmd::Summary => {
            let totals = HistoryLogic::totals(&pool, &cfg.owner)?;
            if totals.is_empty() {
                info("No sessions saved yet.");
                return Ok(());
            }

            header("Hours per task");
            let max = totals.iter().map(|t| t.hours).fold(0.0, f64::max);
            let name_w = totals.iter().map(|t| t.task.chars().count()).max().unwrap_or(0);

            for t in &totals {
                println!(
                    "{:<name_w$}  {}{:<bar_w$}{} {:>6.2} h  {}({}){}",
                    t.task,
                    CYAN,
                    bar(t.hours, max, BAR_WIDTH),
                    RESET,
                    t.hours,
                    GREY,
                    secs2readable(t.seconds),
                    RESET,
                    name_w = name_w,
                    bar_w = BAR_WIDTH
                );
            }
        }
    }

    Ok(())
}
