use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::secs2readable;
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let n = pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(n)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for table in ["sessions", "tasks", "projects", "todos"] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, table, RESET, GREEN, n, RESET);
    }

    //
    // 3) TRACKED TIME
    //
    let total: i64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(duration), 0) FROM sessions",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Tracked time:{} {}", CYAN, RESET, secs2readable(total));

    //
    // 4) SESSION RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM sessions ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT end_time FROM sessions ORDER BY end_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Session range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
