//! Debug switches read from the environment.

/// Runtime debug options. All default to off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugConfig {
    pub debug: bool,
    /// Seek here once at the first position update before it.
    pub start_from_ms: u64,
    /// Stop playback and exit at or after this position. 0 disables.
    pub stop_at_ms: u64,
    /// Log one line per position dispatch.
    pub count_ticks: bool,
    pub hide_taskbar: bool,
}

pub const ENV_DEBUG: &str = "YANZHI_DEBUG";
pub const ENV_START_FROM: &str = "YANZHI_START_FROM";
pub const ENV_STOP_AT: &str = "YANZHI_STOP_AT";
pub const ENV_COUNT_TICKS: &str = "YANZHI_COUNT_TICKS";
pub const ENV_HIDE_TASKBAR: &str = "YANZHI_HIDE_TASKBAR";

impl DebugConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to 0 with a
    /// warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |k: &str| lookup(k).is_some_and(|v| parse_flag(&v));
        let millis = |k: &str| match lookup(k) {
            None => 0,
            Some(v) => v.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(key = k, value = %v, "ignoring non-numeric setting");
                0
            }),
        };
        Self {
            debug: flag(ENV_DEBUG),
            start_from_ms: millis(ENV_START_FROM),
            stop_at_ms: millis(ENV_STOP_AT),
            count_ticks: flag(ENV_COUNT_TICKS),
            hide_taskbar: flag(ENV_HIDE_TASKBAR),
        }
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "on" | "true" | "yes"
    )
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
