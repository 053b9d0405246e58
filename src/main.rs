use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::info;

use respite::{
    CannedContent, LogPresenter, NativeProbe, Settings, StatsStore, TrackerController, TrackerDeps,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Respite starting up...");

    let dirs = ProjectDirs::from("", "", "respite")
        .context("could not determine a data directory")?;
    std::fs::create_dir_all(dirs.data_dir())
        .with_context(|| format!("could not create {}", dirs.data_dir().display()))?;

    let settings = Settings::load(&dirs.data_dir().join("settings.json"))?;
    let store = StatsStore::new(dirs.data_dir().join("focus_stats.json"));
    let probe = NativeProbe::new().context("platform probe init failed")?;

    let mut tracker = TrackerController::new(settings, store);
    tracker.start(TrackerDeps {
        probe: Arc::new(probe),
        content: Arc::new(CannedContent),
        presenter: Arc::new(LogPresenter),
    })?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for the shutdown signal")?;
    info!("shutdown signal received");

    tracker.stop().await?;
    info!("final snapshot flushed, exiting");
    Ok(())
}
