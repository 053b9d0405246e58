use anyhow::{bail, Context, Result};
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::input::InputMonitor;
use crate::models::SessionState;
use crate::settings::Settings;
use crate::store::StatsStore;
use crate::utils::log_action;

use super::loop_worker::{tracking_loop, TrackerDeps};

/// Owns the session state and supervises the sampling loop.
///
/// Restores the previous snapshot at creation, hands the state to the loop at
/// `start`, and guarantees a final flush at `stop` so shutdown never loses a
/// completed tick.
pub struct TrackerController {
    state: Arc<Mutex<SessionState>>,
    store: StatsStore,
    settings: Settings,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl TrackerController {
    pub fn new(settings: Settings, store: StatsStore) -> Self {
        let initial = store.load().unwrap_or_else(|| {
            info!("no prior stats, starting a fresh session");
            SessionState::new()
        });

        Self {
            state: Arc::new(Mutex::new(initial)),
            store,
            settings,
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(&mut self, deps: TrackerDeps) -> Result<()> {
        if self.handle.is_some() {
            bail!("tracking already active");
        }

        let input = InputMonitor::start();
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(tracking_loop(
            Arc::clone(&self.state),
            deps,
            input,
            self.store.clone(),
            self.settings.clone(),
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Stops the sampling loop and flushes the final snapshot.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("tracking loop task failed to join")?;
        }

        let snapshot = self.state.lock().await.clone();
        self.store.save(&snapshot).context("final stats flush failed")
    }

    /// Suspends counting and persistence. The loop keeps running so a resume
    /// takes effect on the next tick.
    pub async fn pause(&self) {
        self.state.lock().await.paused = true;
        log_action("Tracking paused", "");
    }

    pub async fn resume(&self) {
        self.state.lock().await.paused = false;
        log_action("Tracking resumed", "");
    }

    pub async fn is_paused(&self) -> bool {
        self.state.lock().await.paused
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Archives the outgoing session and starts a fresh one with zeroed
    /// counters and `start_time = now`.
    pub async fn reset_session(&self) -> Result<()> {
        let mut guard = self.state.lock().await;
        self.store
            .archive(&guard)
            .context("failed to persist the outgoing session")?;

        *guard = SessionState::new();
        self.store
            .save(&guard)
            .context("failed to persist the fresh session")?;
        log_action("Session reset", "");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{PlatformProbe, UNKNOWN_APP};
    use crate::reminder::{CannedContent, LogPresenter, ReminderContent};
    use std::time::Duration;
    use tempfile::tempdir;

    struct StubProbe {
        app: &'static str,
        idle_secs: u64,
    }

    impl PlatformProbe for StubProbe {
        fn foreground_app(&self) -> String {
            self.app.to_string()
        }

        fn idle_secs(&self) -> u64 {
            self.idle_secs
        }
    }

    fn deps_with(probe: StubProbe) -> TrackerDeps {
        TrackerDeps {
            probe: Arc::new(probe),
            content: Arc::new(CannedContent),
            presenter: Arc::new(LogPresenter),
        }
    }

    fn fast_settings() -> Settings {
        Settings {
            idle_threshold_secs: 60,
            sampling_interval_secs: 1,
            reminder_threshold_secs: 3600,
        }
    }

    #[tokio::test]
    async fn active_tick_accumulates_and_persists() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("focus_stats.json"));
        let mut tracker = TrackerController::new(fast_settings(), store.clone());

        tracker
            .start(deps_with(StubProbe { app: "TestApp", idle_secs: 0 }))
            .unwrap();
        // The first interval tick fires immediately.
        tokio::time::sleep(Duration::from_millis(200)).await;
        tracker.stop().await.unwrap();

        let state = tracker.snapshot().await;
        assert!(state.active_seconds >= 1);
        assert!(state.app_usage["TestApp"] >= 1);
        assert_eq!(state.app_usage["TestApp"], state.active_seconds);
        assert_eq!(store.load(), Some(state));
    }

    #[tokio::test]
    async fn failed_probe_is_credited_to_unknown() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("focus_stats.json"));
        let mut tracker = TrackerController::new(fast_settings(), store);

        tracker
            .start(deps_with(StubProbe { app: UNKNOWN_APP, idle_secs: 0 }))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        tracker.stop().await.unwrap();

        let state = tracker.snapshot().await;
        assert!(state.app_usage[UNKNOWN_APP] >= 1);
    }

    #[tokio::test]
    async fn paused_ticks_mutate_and_persist_nothing() {
        let dir = tempdir().unwrap();
        let stats_path = dir.path().join("focus_stats.json");
        let store = StatsStore::new(stats_path.clone());
        let mut tracker = TrackerController::new(fast_settings(), store);

        tracker.pause().await;
        tracker
            .start(deps_with(StubProbe { app: "TestApp", idle_secs: 0 }))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = tracker.snapshot().await;
        assert_eq!(state.active_seconds, 0);
        assert!(state.app_usage.is_empty());
        assert!(!stats_path.exists());

        tracker.stop().await.unwrap();
    }

    #[tokio::test]
    async fn idle_user_accrues_no_usage() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("focus_stats.json"));
        let mut tracker = TrackerController::new(fast_settings(), store);

        // Well past the 60s threshold on every tick.
        tracker
            .start(deps_with(StubProbe { app: "TestApp", idle_secs: 300 }))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        tracker.stop().await.unwrap();

        let state = tracker.snapshot().await;
        assert_eq!(state.active_seconds, 0);
        assert_eq!(state.idle_count, 1);
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("focus_stats.json"));
        let mut tracker = TrackerController::new(fast_settings(), store);

        tracker
            .start(deps_with(StubProbe { app: "TestApp", idle_secs: 0 }))
            .unwrap();
        assert!(tracker
            .start(deps_with(StubProbe { app: "TestApp", idle_secs: 0 }))
            .is_err());
        tracker.stop().await.unwrap();
    }

    #[tokio::test]
    async fn reminder_fires_from_accumulated_active_time() {
        struct StaticContent;
        impl ReminderContent for StaticContent {
            fn generate(&self) -> anyhow::Result<String> {
                Ok("break".to_string())
            }
        }

        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("focus_stats.json"));
        let settings = Settings {
            idle_threshold_secs: 60,
            sampling_interval_secs: 1,
            // Every active tick crosses the threshold.
            reminder_threshold_secs: 1,
        };
        let mut tracker = TrackerController::new(settings, store);

        tracker
            .start(TrackerDeps {
                probe: Arc::new(StubProbe { app: "TestApp", idle_secs: 0 }),
                content: Arc::new(StaticContent),
                presenter: Arc::new(LogPresenter),
            })
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        tracker.stop().await.unwrap();

        let state = tracker.snapshot().await;
        assert!(state.reminder_count >= 1);
    }

    #[tokio::test]
    async fn reset_starts_a_zeroed_session_and_archives_the_old_one() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("focus_stats.json"));
        let tracker = TrackerController::new(fast_settings(), store.clone());

        let old_start = {
            let mut guard = tracker.state.lock().await;
            guard.record_active_tick("Chrome", 30);
            guard.start_time
        };

        tracker.reset_session().await.unwrap();

        let state = tracker.snapshot().await;
        assert_eq!(state.active_seconds, 0);
        assert!(state.app_usage.is_empty());
        assert!(state.start_time >= old_start);

        let archived = dir.path().join(format!(
            "focus_stats-{}.json",
            old_start.format("%Y%m%dT%H%M%S")
        ));
        assert!(archived.exists());
        assert_eq!(store.load(), Some(state));
    }

    #[tokio::test]
    async fn restores_prior_snapshot_at_creation() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("focus_stats.json"));

        let mut prior = SessionState::new();
        prior.record_active_tick("Editor", 90);
        store.save(&prior).unwrap();

        let tracker = TrackerController::new(fast_settings(), store);
        assert_eq!(tracker.snapshot().await, prior);
    }
}
