pub mod checklist;
pub mod mode;
pub mod project;
pub mod session;
pub mod task;
