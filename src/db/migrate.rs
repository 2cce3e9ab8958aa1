//! Schema management.
//!
//! The `log` table is created first; every other schema change is a named
//! migration applied once and recorded in `log` as `migration_applied`.

use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_projects",
        description: "Created projects table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS projects (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id        TEXT NOT NULL,
            title           TEXT NOT NULL,
            description     TEXT NOT NULL DEFAULT '',
            tags            TEXT NOT NULL DEFAULT '[]',
            notes           TEXT NOT NULL DEFAULT '',
            progress        INTEGER NOT NULL DEFAULT 0 CHECK(progress BETWEEN 0 AND 100),
            status          TEXT NOT NULL DEFAULT 'pending'
                            CHECK(status IN ('pending','in_progress','finished')),
            estimation_date TEXT,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_projects_owner ON projects(owner_id, created_at);
        "#,
    },
    Migration {
        version: "20250901_0002_create_todos",
        description: "Created todos table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS todos (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            owner_id    TEXT NOT NULL,
            title       TEXT NOT NULL,
            priority    TEXT NOT NULL DEFAULT 'medium' CHECK(priority IN ('high','medium','low')),
            completed   INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_todos_project ON todos(project_id, owner_id);
        "#,
    },
    Migration {
        version: "20250901_0003_create_tasks",
        description: "Created tasks table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id        TEXT NOT NULL,
            name            TEXT NOT NULL,
            description     TEXT,
            status          TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','completed')),
            subtasks        TEXT NOT NULL DEFAULT '[]',
            total_duration  INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL,
            UNIQUE(owner_id, name)
        );
        "#,
    },
    Migration {
        version: "20250901_0004_create_sessions",
        description: "Created sessions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id    TEXT NOT NULL,
            task_id     INTEGER REFERENCES tasks(id) ON DELETE SET NULL,
            type        TEXT NOT NULL CHECK(type IN ('timer','stopwatch')),
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            duration    INTEGER NOT NULL CHECK(duration >= 0),
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_owner_start ON sessions(owner_id, start_time);
        CREATE INDEX IF NOT EXISTS idx_sessions_task ON sessions(task_id);
        "#,
    },
    Migration {
        version: "20251010_0005_add_task_progress",
        description: "Added progress column to tasks",
        sql: r#"
        ALTER TABLE tasks
            ADD COLUMN progress INTEGER NOT NULL DEFAULT 0 CHECK(progress BETWEEN 0 AND 100);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded in `log`, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;

    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Each migration runs in its own transaction together with its `log` row,
/// so a failure leaves the schema at the last completed version.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let mut applied = 0;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;
        let result = conn
            .execute_batch(m.sql)
            .map_err(crate::errors::AppError::from)
            .and_then(|_| ttlog(conn, "migration_applied", m.version, m.description));

        match result {
            Ok(()) => conn.execute_batch("COMMIT;")?,
            Err(e) => {
                conn.execute_batch("ROLLBACK;")?;
                return Err(crate::errors::AppError::Migration(format!(
                    "{}: {}",
                    m.version, e
                )));
            }
        }

        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}
