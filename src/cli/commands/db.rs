use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{applied_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // Opened without migrating so `--migrate` reports what it applies.
        let pool = DbPool::open_raw(&cfg.database)?;

        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            if applied == 0 {
                println!("{}✔ Database schema is up to date.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✔ Migration completed ({} applied).{}\n",
                    GREEN, applied, RESET
                );
            }
        }

        if *info {
            run_pending_migrations(&pool.conn)?;
            stats::print_db_info(&pool, &cfg.database)?;
            let versions = applied_migrations(&pool.conn)?;
            println!("{}• Migrations:{} {}", CYAN, RESET, versions.join(", "));
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
