use crate::export::ExportFormat;
use crate::models::mode::SessionMode;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rFocuslog
/// CLI application to track focus sessions with SQLite
#[derive(Parser)]
#[command(
    name = "rfocuslog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Focus tracking CLI: timer and stopwatch sessions, tasks, projects and todos",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage tasks (tracking targets)
    Task {
        #[command(subcommand)]
        action: TaskCmd,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectCmd,
    },

    /// Manage the todos of a project
    Todo {
        #[command(subcommand)]
        action: TodoCmd,
    },

    /// Save a finished timer or stopwatch run
    Session {
        #[command(subcommand)]
        action: SessionCmd,
    },

    /// Run a timer or stopwatch in the terminal and save the session
    Track {
        /// stopwatch (count up) or timer (count down)
        #[arg(value_enum)]
        mode: SessionMode,

        #[arg(long, short = 't', help = "Task name or id")]
        task: Option<String>,

        #[arg(long, short = 'm', help = "Timer length in minutes (default from config)")]
        minutes: Option<u32>,

        #[arg(
            long,
            short = 'p',
            conflicts_with = "minutes",
            help = "Timer length from the configured presets (timer_presets)"
        )]
        preset: Option<u32>,
    },

    /// Browse saved sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsCmd,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export saved sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskCmd {
    /// Create a task, or update the task with the same name
    Add {
        name: String,

        #[arg(long, short = 'd')]
        description: Option<String>,

        #[arg(
            long = "subtask",
            short = 's',
            help = "Subtask title (repeatable; replaces the existing list)"
        )]
        subtasks: Vec<String>,
    },

    /// List tasks, newest first
    List,

    /// Toggle a subtask (1-based position)
    Done { task: String, subtask: usize },

    /// Mark a task completed
    Complete {
        task: String,

        #[arg(long, help = "Set the task active again")]
        reopen: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCmd {
    /// Create a project
    Add {
        title: String,

        #[arg(long, short = 'd', default_value = "")]
        description: String,

        #[arg(long, value_delimiter = ',', help = "Comma separated tags")]
        tags: Vec<String>,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long = "due", help = "Estimation date (YYYY-MM-DD)")]
        due: Option<String>,
    },

    /// List projects with their progress
    List,

    /// Show a project and its todos
    Show { id: i64 },

    /// Change project fields
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,

        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long, help = "pending | in_progress | finished")]
        status: Option<String>,

        #[arg(long = "due", help = "Estimation date (YYYY-MM-DD)")]
        due: Option<String>,
    },

    /// Delete a project and its todos
    Del {
        id: i64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TodoCmd {
    /// Add a todo to a project
    Add {
        project: i64,
        title: String,

        #[arg(long, short = 'p', default_value = "medium", help = "high | medium | low")]
        priority: String,
    },

    /// List the todos of a project
    List { project: i64 },

    /// Flip a todo between done and open
    Toggle { id: i64 },

    /// Change a todo
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short = 'p')]
        priority: Option<String>,
    },

    /// Delete a todo
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum SessionCmd {
    /// Reconcile a raw timer value into a session and store it
    Save {
        #[arg(long, value_enum)]
        mode: SessionMode,

        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Stopwatch: elapsed time. Timer: remaining time. Seconds or milliseconds"
        )]
        value: String,

        #[arg(long, short = 'm', help = "Timer length in minutes (default from config)")]
        minutes: Option<f64>,

        #[arg(
            long,
            short = 'p',
            conflicts_with = "minutes",
            help = "Timer length from the configured presets (timer_presets)"
        )]
        preset: Option<u32>,

        #[arg(long, short = 't', help = "Task name or id")]
        task: Option<String>,

        #[arg(
            long,
            help = "Session end: RFC 3339, 'YYYY-MM-DD HH:MM[:SS]' or epoch ms (default: now)"
        )]
        end: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SessionsCmd {
    /// List sessions, newest first
    List {
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
    },

    /// Hours tracked per task
    Summary,
}
