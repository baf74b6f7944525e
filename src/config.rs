use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DATA_DIR_ENV: &str = "EVENTPLAN_DATA_DIR";
pub const SEED_ENV: &str = "EVENTPLAN_SEED";
pub const POLL_MS_ENV: &str = "EVENTPLAN_POLL_MS";

/// Planner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,

    /// Seed empty collections with the sample plan instead of nothing
    pub seed_sample_data: bool,

    /// How often file-backed contexts look for changes made elsewhere
    pub poll_interval: Duration,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("eventplan-data"),
            seed_sample_data: false,
            poll_interval: Duration::from_millis(500),
        }
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Enable or disable sample data
    pub fn seed_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }

    /// Set the polling interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Build from `EVENTPLAN_*` environment variables, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = lookup(SEED_ENV).and_then(|raw| parse_flag(&raw)) {
            config.seed_sample_data = seed;
        }
        if let Some(ms) = lookup(POLL_MS_ENV).and_then(|raw| raw.trim().parse::<u64>().ok()) {
            config.poll_interval = Duration::from_millis(ms.max(1));
        }
        config
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
