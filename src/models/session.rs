use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accumulated counters for the current tracking session.
///
/// Mutated only by the sampling tick; every operation on the public surface
/// is additive, so counters never decrease within a session. Field names
/// match the persisted `focus_stats.json` layout, and every field carries a
/// serde default so older or partial snapshots still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    #[serde(default = "Utc::now")]
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub app_usage: HashMap<String, u64>,
    #[serde(default)]
    pub active_seconds: u64,
    #[serde(default)]
    pub idle_count: u64,
    #[serde(default)]
    pub reminder_count: u64,
    #[serde(default)]
    pub paused: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            start_time: Utc::now(),
            app_usage: HashMap::new(),
            active_seconds: 0,
            idle_count: 0,
            reminder_count: 0,
            paused: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits one active tick to the foreground app. The same delta goes to
    /// `active_seconds` and to the app's own counter so the two stay in step.
    pub fn record_active_tick(&mut self, app: &str, delta_secs: u64) {
        if self.paused {
            return;
        }
        self.active_seconds += delta_secs;
        *self.app_usage.entry(app.to_string()).or_insert(0) += delta_secs;
    }

    /// Counts one active-to-idle transition.
    pub fn record_idle_transition(&mut self) {
        if self.paused {
            return;
        }
        self.idle_count += 1;
    }

    /// Counts one delivered reminder.
    pub fn record_reminder(&mut self) {
        if self.paused {
            return;
        }
        self.reminder_count += 1;
    }
}
