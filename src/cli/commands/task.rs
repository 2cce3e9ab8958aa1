use crate::cli::parser::{Commands, TaskCmd};
use crate::config::Config;
use crate::core::progress::checklist_counts;
use crate::core::task::TaskLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::task::{Subtask, Task, TaskInput, TaskStatus};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET, checkbox, color_for_progress};
use crate::utils::formatting::secs2readable;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TaskCmd::Add {
            name,
            description,
            subtasks,
        } => {
            let input = TaskInput {
                name: name.clone(),
                description: description.clone(),
                subtasks: (!subtasks.is_empty())
                    .then(|| subtasks.iter().map(|s| Subtask::new(s)).collect()),
            };

            let (task, created) = TaskLogic::add_or_update(&mut pool, &cfg.owner, &input)?;
            if created {
                success(format!("Task #{} '{}' created.", task.id, task.name));
            } else {
                success(format!("Task #{} '{}' updated.", task.id, task.name));
            }
            print_checklist(&task);
        }

        TaskCmd::List => {
            let tasks = TaskLogic::list(&pool, &cfg.owner)?;
            if tasks.is_empty() {
                info("No tasks yet. Add one with `rfocuslog task add <name>`.");
                return Ok(());
            }

            let mut table =
                Table::new(&["ID", "Name", "Status", "Progress", "Subtasks", "Tracked"]);
            for t in &tasks {
                let (done, total) = checklist_counts(&t.checklist());
                table.add_row(vec![
                    t.id.to_string(),
                    t.name.clone(),
                    status_label(t.status),
                    format!("{}{:>3}%{}", color_for_progress(t.progress), t.progress, RESET),
                    format!("{}/{}", done, total),
                    secs2readable(t.total_duration),
                ]);
            }
            print!("{}", table.render());
        }

        TaskCmd::Done { task, subtask } => {
            let task = TaskLogic::toggle_subtask(&mut pool, &cfg.owner, task, *subtask)?;
            success(format!("Task '{}' progress: {}%", task.name, task.progress));
            print_checklist(&task);
        }

        TaskCmd::Complete { task, reopen } => {
            let task = TaskLogic::set_status(&mut pool, &cfg.owner, task, *reopen)?;
            success(format!(
                "Task '{}' is now {}.",
                task.name,
                task.status.to_db_str()
            ));
        }
    }

    Ok(())
}

fn status_label(status: TaskStatus) -> String {
    match status {
        TaskStatus::Active => "active".to_string(),
        TaskStatus::Completed => format!("{GREEN}completed{RESET}"),
    }
}

fn print_checklist(task: &Task) {
    for item in task.checklist() {
        println!(
            "  {} {}{}. {}{}",
            checkbox(item.subtask.is_completed),
            GREY,
            item.position,
            RESET,
            item.subtask.title
        );
    }
}
