//! Stopwatch and countdown timer state, advanced by explicit ticks.

use crate::core::reconcile::{EndMoment, TimeEntry};

/// Stopwatch tick granularity.
pub const STOPWATCH_TICK_MS: u64 = 100;

/// Counts up in 100 ms steps; its value is elapsed milliseconds.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    elapsed_ms: u64,
    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_ms += STOPWATCH_TICK_MS;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// `m:ss:d` (minutes, seconds, tenths).
    pub fn display(&self) -> String {
        format!(
            "{}:{:02}:{}",
            self.elapsed_ms / 60_000,
            (self.elapsed_ms % 60_000) / 1000,
            (self.elapsed_ms % 1000) / 100
        )
    }

    pub fn entry(&self, end_moment: EndMoment) -> TimeEntry {
        TimeEntry::stopwatch(self.elapsed_ms as f64, end_moment)
    }
}

/// Counts down once per second from a configured number of minutes.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    target_minutes: u32,
    remaining_secs: u64,
    running: bool,
}

impl Countdown {
    pub fn new(target_minutes: u32) -> Self {
        Self {
            target_minutes,
            remaining_secs: u64::from(target_minutes) * 60,
            running: false,
        }
    }

    /// Pick a new target; also rewinds the remaining time.
    pub fn set(&mut self, minutes: u32) {
        self.target_minutes = minutes;
        self.reset();
    }

    /// Start only if there is time left.
    pub fn start(&mut self) -> bool {
        self.running = self.remaining_secs > 0;
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = u64::from(self.target_minutes) * 60;
    }

    /// One second passes. Stops by itself when it reaches zero.
    pub fn tick(&mut self) {
        if self.running && self.remaining_secs > 0 {
            self.remaining_secs -= 1;
        }
        if self.remaining_secs == 0 {
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn target_minutes(&self) -> u32 {
        self.target_minutes
    }

    /// `m:ss`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    pub fn entry(&self, end_moment: EndMoment) -> TimeEntry {
        TimeEntry::timer(
            f64::from(self.target_minutes),
            self.remaining_secs as f64,
            end_moment,
        )
    }
}
