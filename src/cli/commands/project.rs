use crate::cli::parser::{Commands, ProjectCmd};
use crate::config::Config;
use crate::core::project::ProjectLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewProject, Project, ProjectPatch, ProjectStatus};
use crate::ui::messages::{confirm, header, info, success, warning};
use crate::utils::colors::{GREY, RESET, checkbox, color_for_progress};
use crate::utils::formatting::progress_bar;
use crate::utils::table::Table;
use crate::utils::time::parse_date;
use chrono::NaiveDate;

fn parse_due(raw: &Option<String>) -> AppResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
    }
}

fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Project { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ProjectCmd::Add {
            title,
            description,
            tags,
            notes,
            due,
        } => {
            let input = NewProject {
                title: title.clone(),
                description: description.clone(),
                tags: clean_tags(tags),
                notes: notes.clone(),
                estimation_date: parse_due(due)?,
            };
            let project = ProjectLogic::create(&mut pool, &cfg.owner, &input)?;
            success(format!("Project #{} '{}' created.", project.id, project.title));
        }

        ProjectCmd::List => {
            let projects = ProjectLogic::list(&pool, &cfg.owner)?;
            if projects.is_empty() {
                info("No projects yet.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Title", "Status", "Progress", "Due", "Tags"]);
            for p in &projects {
                table.add_row(vec![
                    p.id.to_string(),
                    p.title.clone(),
                    p.status.to_db_str().to_string(),
                    format!(
                        "{}{}{}",
                        color_for_progress(p.progress),
                        progress_bar(p.progress, 10),
                        RESET
                    ),
                    p.estimation_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".into()),
                    p.tags.join(", "),
                ]);
            }
            print!("{}", table.render());
        }

        ProjectCmd::Show { id } => {
            let (project, todos) = ProjectLogic::show(&pool, &cfg.owner, *id)?;
            print_project(&project);

            if todos.is_empty() {
                println!("\n  {GREY}No todos.{RESET}");
            } else {
                println!();
                for t in &todos {
                    println!(
                        "  {} {}#{}{} {} {}({}){}",
                        checkbox(t.completed),
                        GREY,
                        t.id,
                        RESET,
                        t.title,
                        GREY,
                        t.priority.to_db_str(),
                        RESET
                    );
                }
            }
        }

        ProjectCmd::Edit {
            id,
            title,
            description,
            tags,
            notes,
            status,
            due,
        } => {
            let status = match status {
                None => None,
                Some(s) => Some(
                    ProjectStatus::from_code(s).ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
                ),
            };

            let patch = ProjectPatch {
                title: title.clone(),
                description: description.clone(),
                tags: tags.as_deref().map(clean_tags),
                notes: notes.clone(),
                status,
                estimation_date: parse_due(due)?,
            };

            if patch.is_empty() {
                warning("Nothing to update.");
                return Ok(());
            }

            let project = ProjectLogic::update(&mut pool, &cfg.owner, *id, &patch)?;
            success(format!("Project #{} updated.", project.id));
        }

        ProjectCmd::Del { id, force } => {
            let project = ProjectLogic::owned(&pool.conn, &cfg.owner, *id)?;
            if !force
                && !confirm(format!(
                    "Delete project '{}' and all its todos?",
                    project.title
                ))
            {
                info("Deletion cancelled.");
                return Ok(());
            }
            ProjectLogic::delete(&mut pool, &cfg.owner, *id)?;
            success(format!("Project #{} deleted.", id));
        }
    }

    Ok(())
}

fn print_project(p: &Project) {
    header(format!("#{} {}", p.id, p.title));
    if !p.description.is_empty() {
        println!("{}", p.description);
    }
    println!(
        "Status   : {}\nProgress : {}{}{}",
        p.status.to_db_str(),
        color_for_progress(p.progress),
        progress_bar(p.progress, 20),
        RESET
    );
    if let Some(d) = p.estimation_date {
        println!("Due      : {}", d);
    }
    if !p.tags.is_empty() {
        println!("Tags     : {}", p.tags.join(", "));
    }
    if !p.notes.is_empty() {
        println!("Notes    : {}", p.notes);
    }
}
