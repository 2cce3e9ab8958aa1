pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod project;
pub mod session;
pub mod sessions;
pub mod task;
pub mod todo;
pub mod track;
