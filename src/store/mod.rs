use anyhow::{Context, Result};
use log::{debug, warn};
use std::{fs, io, path::PathBuf};

use crate::models::SessionState;

/// JSON snapshot store for session counters.
///
/// Writes go through a temp file plus rename so a crash mid-write leaves the
/// previous snapshot intact. Reads are forgiving: an absent, empty or
/// unparseable file is reported as "no prior state", never as an error.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        let serialized = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized)
            .with_context(|| format!("Failed to write stats to {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to move stats into {}", self.path.display()))
    }

    pub fn load(&self) -> Option<SessionState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no stats file at {}", self.path.display());
                return None;
            }
            Err(err) => {
                warn!("could not read stats file {}: {err}", self.path.display());
                return None;
            }
        };

        if contents.trim().is_empty() {
            warn!("stats file {} is empty, starting fresh", self.path.display());
            return None;
        }

        match serde_json::from_str(&contents) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(
                    "stats file {} does not match the expected shape ({err}), starting fresh",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Writes the outgoing session next to the live snapshot before a reset,
    /// named by its start time, e.g. `focus_stats-20260829T120000.json`.
    pub fn archive(&self, state: &SessionState) -> Result<()> {
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("focus_stats");
        let archived = self.path.with_file_name(format!(
            "{stem}-{}.json",
            state.start_time.format("%Y%m%dT%H%M%S")
        ));
        let serialized = serde_json::to_string_pretty(state)?;
        fs::write(&archived, serialized)
            .with_context(|| format!("Failed to archive stats to {}", archived.display()))
    }
}
