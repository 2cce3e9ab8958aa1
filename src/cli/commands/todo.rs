use crate::cli::parser::{Commands, TodoCmd};
use crate::config::Config;
use crate::core::todo::{TodoChange, TodoLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewTodo, Priority, TodoPatch};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, checkbox, color_for_progress};
use crate::utils::table::Table;

fn parse_priority(raw: &str) -> AppResult<Priority> {
    Priority::from_code(raw).ok_or_else(|| AppError::InvalidPriority(raw.to_string()))
}

fn report(action: &str, change: &TodoChange) {
    success(format!("Todo #{} {}.", change.todo.id, action));
    if change.progress_changed {
        info(format!(
            "Project #{} progress: {}{}%{}",
            change.todo.project_id,
            color_for_progress(change.progress),
            change.progress,
            RESET
        ));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Todo { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TodoCmd::Add {
            project,
            title,
            priority,
        } => {
            let input = NewTodo {
                project_id: *project,
                title: title.clone(),
                priority: parse_priority(priority)?,
            };
            let change = TodoLogic::add(&mut pool, &cfg.owner, &input)?;
            report("added", &change);
        }

        TodoCmd::List { project } => {
            let todos = TodoLogic::list(&pool, &cfg.owner, *project)?;
            if todos.is_empty() {
                info(format!("Project #{} has no todos.", project));
                return Ok(());
            }

            let mut table = Table::new(&["", "ID", "Title", "Priority"]);
            for t in &todos {
                table.add_row(vec![
                    checkbox(t.completed),
                    t.id.to_string(),
                    t.title.clone(),
                    t.priority.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        TodoCmd::Toggle { id } => {
            let change = TodoLogic::toggle(&mut pool, &cfg.owner, *id)?;
            let state = if change.todo.completed { "done" } else { "reopened" };
            report(state, &change);
        }

        TodoCmd::Edit {
            id,
            title,
            priority,
        } => {
            let patch = TodoPatch {
                title: title.clone(),
                priority: priority.as_deref().map(parse_priority).transpose()?,
                completed: None,
            };
            if patch.title.is_none() && patch.priority.is_none() {
                warning("Nothing to update.");
                return Ok(());
            }
            let change = TodoLogic::update(&mut pool, &cfg.owner, *id, &patch)?;
            report("updated", &change);
        }

        TodoCmd::Del { id } => {
            let change = TodoLogic::delete(&mut pool, &cfg.owner, *id)?;
            report("deleted", &change);
        }
    }

    Ok(())
}
