use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// Colour for an operation name in the log listing.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "session" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "progress" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)` truncated to the column width, with only `op` coloured.
fn render_op_target(operation: &str, target: &str) -> String {
    let plain = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rendered: Vec<String> = entries
            .iter()
            .map(|e| render_op_target(&e.operation, &e.target))
            .collect();

        let op_w = rendered
            .iter()
            .map(|r| strip_ansi(r).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        println!("📜 Internal log:\n");

        for (e, op_target) in entries.iter().zip(rendered) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                op_target,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
