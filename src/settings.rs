use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

fn default_idle_threshold() -> u64 {
    60
}

fn default_sampling_interval() -> u64 {
    5
}

fn default_reminder_threshold() -> u64 {
    3600
}

/// Tracker configuration, loaded from a JSON file with per-field defaults so
/// a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds without input before the user counts as idle.
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold_secs: u64,
    /// Seconds between sampling ticks.
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval_secs: u64,
    /// Accumulated active seconds between break reminders.
    #[serde(default = "default_reminder_threshold")]
    pub reminder_threshold_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            idle_threshold_secs: default_idle_threshold(),
            sampling_interval_secs: default_sampling_interval(),
            reminder_threshold_secs: default_reminder_threshold(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, falling back to defaults when the file is
    /// absent. A present-but-invalid file or a nonsensical threshold is a
    /// startup error; the tracker refuses to run with a broken configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings in {}", path.display()))?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.idle_threshold_secs == 0 {
            bail!("idle_threshold_secs must be greater than zero");
        }
        if self.sampling_interval_secs == 0 {
            bail!("sampling_interval_secs must be greater than zero");
        }
        if self.reminder_threshold_secs == 0 {
            bail!("reminder_threshold_secs must be greater than zero");
        }
        Ok(())
    }
}
