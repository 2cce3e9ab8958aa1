//! Formatting utilities used for CLI and export outputs.

/// `125` → `2m 5s`
pub fn secs2readable(secs: i64) -> String {
    let s = secs.max(0);
    format!("{}m {}s", s / 60, s % 60)
}

/// Seconds → hours, rounded to two decimals.
pub fn secs2hours(secs: i64) -> f64 {
    (secs as f64 / 3600.0 * 100.0).round() / 100.0
}

/// Horizontal bar of `width` cells scaled against `max`.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

/// Progress as `[#####-----]  50%`.
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (usize::from(progress) * width + 50) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled.min(width)),
        progress
    )
}
