/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Progress color:
/// 100 → green
/// 0 → grey
/// anything in between → yellow
pub fn color_for_progress(value: u8) -> &'static str {
    match value {
        100 => GREEN,
        0 => GREY,
        _ => YELLOW,
    }
}

/// Checkbox for a done / open item, coloured.
pub fn checkbox(done: bool) -> String {
    if done {
        format!("{GREEN}[x]{RESET}")
    } else {
        format!("{GREY}[ ]{RESET}")
    }
}
