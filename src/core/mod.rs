pub mod backup;
pub mod config;
pub mod history;
pub mod log;
pub mod progress;
pub mod project;
pub mod reconcile;
pub mod session;
pub mod task;
pub mod todo;
pub mod tracker;
