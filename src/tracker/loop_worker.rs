use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::input::InputMonitor;
use crate::models::SessionState;
use crate::platform::PlatformProbe;
use crate::reminder::{resolve_message, ReminderContent, ReminderPresenter, ReminderScheduler};
use crate::settings::Settings;
use crate::store::StatsStore;
use crate::utils::log_action;

use super::classifier::{classify, ActivityState, Transition};

const TICK_TIMEOUT_SECS: u64 = 30;
const PRESENT_TIMEOUT_SECS: u64 = 5;

/// Collaborators the sampling loop drives each tick.
pub struct TrackerDeps {
    pub probe: Arc<dyn PlatformProbe>,
    pub content: Arc<dyn ReminderContent>,
    pub presenter: Arc<dyn ReminderPresenter>,
}

/// Per-tick pipeline: probe, classify, accumulate, schedule, persist.
///
/// Ticks are serialized; a slow tick delays the next one rather than
/// overlapping it. A tick that errors or exceeds its timeout is logged and
/// skipped, never allowed to kill the loop.
pub async fn tracking_loop(
    state: Arc<Mutex<SessionState>>,
    deps: TrackerDeps,
    input: InputMonitor,
    store: StatsStore,
    settings: Settings,
    cancel_token: CancellationToken,
) {
    let mut ticker =
        tokio::time::interval(Duration::from_secs(settings.sampling_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut activity = ActivityState::Active;
    let mut idle_since: Option<Instant> = None;
    let mut last_app: Option<String> = None;
    let mut scheduler = ReminderScheduler::new(settings.reminder_threshold_secs);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let fut = perform_tick(
                    &state,
                    &deps,
                    &input,
                    &store,
                    &settings,
                    &mut activity,
                    &mut idle_since,
                    &mut last_app,
                    &mut scheduler,
                );

                match tokio::time::timeout(Duration::from_secs(TICK_TIMEOUT_SECS), fut).await {
                    Ok(Ok(())) => {},
                    Ok(Err(err)) => error!("tick skipped: {err:?}"),
                    Err(_) => warn!("tick timeout (> {TICK_TIMEOUT_SECS}s)"),
                }
            }
            _ = cancel_token.cancelled() => {
                info!("tracking loop shutting down");
                break;
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn perform_tick(
    state: &Arc<Mutex<SessionState>>,
    deps: &TrackerDeps,
    input: &InputMonitor,
    store: &StatsStore,
    settings: &Settings,
    activity: &mut ActivityState,
    idle_since: &mut Option<Instant>,
    last_app: &mut Option<String>,
    scheduler: &mut ReminderScheduler,
) -> Result<()> {
    // Paused: keep looping for responsiveness, but mutate and persist nothing.
    if state.lock().await.paused {
        debug!("paused, skipping tick");
        return Ok(());
    }

    let delta_secs = settings.sampling_interval_secs;

    // The probe may shell out; keep it off the runtime threads.
    let probe = Arc::clone(&deps.probe);
    let probe_idle = tokio::task::spawn_blocking(move || probe.idle_secs())
        .await
        .context("idle probe worker join failed")?;

    // Input seen by the listener ends an idle span even when the OS idle
    // counter lags, so take whichever source saw activity most recently.
    let idle_secs = match input.idle_secs() {
        Some(listener_idle) => probe_idle.min(listener_idle),
        None => probe_idle,
    };

    let (next, transition) = classify(*activity, idle_secs, settings.idle_threshold_secs);
    match transition {
        Some(Transition::IdleStarted) => {
            log_action("Idle started", "");
            *idle_since = Some(Instant::now());
            state.lock().await.record_idle_transition();
        }
        Some(Transition::ActiveResumed) => {
            let span_secs = idle_since
                .take()
                .map(|since| since.elapsed().as_secs())
                .unwrap_or(0);
            log_action("Back to active", &format!("idle for {span_secs}s"));
        }
        None => {}
    }
    *activity = next;

    if *activity == ActivityState::Active {
        let probe = Arc::clone(&deps.probe);
        let app = tokio::task::spawn_blocking(move || probe.foreground_app())
            .await
            .context("foreground probe worker join failed")?;

        if last_app.as_deref() != Some(app.as_str()) {
            log_action("App switched", &app);
            *last_app = Some(app.clone());
        }

        state.lock().await.record_active_tick(&app, delta_secs);

        if scheduler.record_active(delta_secs) {
            deliver_reminder(state, deps).await;
        }
    }

    let snapshot = state.lock().await.clone();
    if let Err(err) = store.save(&snapshot) {
        warn!("stats write failed, retrying next tick: {err:?}");
    }

    Ok(())
}

/// Produces and presents one reminder. Content failures fall back to the
/// static message and the presenter is bounded by a timeout, so the reminder
/// counter always advances.
async fn deliver_reminder(state: &Arc<Mutex<SessionState>>, deps: &TrackerDeps) {
    let message = resolve_message(deps.content.as_ref());

    let presenter = Arc::clone(&deps.presenter);
    let to_show = message.clone();
    let show = tokio::task::spawn_blocking(move || presenter.show(&to_show));
    match tokio::time::timeout(Duration::from_secs(PRESENT_TIMEOUT_SECS), show).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!("reminder presenter worker join failed: {err}"),
        Err(_) => warn!("reminder presenter timeout (> {PRESENT_TIMEOUT_SECS}s)"),
    }

    state.lock().await.record_reminder();
    log_action("Reminder shown", &message);
}
