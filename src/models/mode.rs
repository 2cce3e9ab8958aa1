use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a tracked session measures time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SessionMode {
    /// Stopwatch: the tick value is the elapsed time.
    #[value(name = "stopwatch", alias = "count-up")]
    #[serde(rename = "stopwatch")]
    CountUp,
    /// Timer: the tick value is the remaining time of a configured target.
    #[value(name = "timer", alias = "count-down")]
    #[serde(rename = "timer")]
    CountDown,
}

impl SessionMode {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionMode::CountUp => "stopwatch",
            SessionMode::CountDown => "timer",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "stopwatch" => Some(SessionMode::CountUp),
            "timer" => Some(SessionMode::CountDown),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::CountUp => "Stopwatch",
            SessionMode::CountDown => "Timer",
        }
    }

    pub fn is_count_up(&self) -> bool {
        matches!(self, SessionMode::CountUp)
    }
}
