use log::warn;
use rdev::{listen, EventType};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

/// Global input listener feeding a shared last-activity timestamp.
///
/// Runs on its own OS thread since `rdev::listen` blocks for the life of the
/// process. It never touches session counters; the sampling loop reads the
/// timestamp to end an idle span as soon as input is seen again. Until the
/// first event arrives (or if the hook cannot be installed at all, e.g. in a
/// headless session) it reports nothing and the platform probe's idle source
/// stands alone.
pub struct InputMonitor {
    last_activity: Arc<Mutex<Option<Instant>>>,
}

impl InputMonitor {
    pub fn start() -> Self {
        let last_activity = Arc::new(Mutex::new(None));
        let shared = Arc::clone(&last_activity);

        thread::spawn(move || {
            if let Err(err) = listen(move |event| match event.event_type {
                EventType::KeyPress(_)
                | EventType::KeyRelease(_)
                | EventType::ButtonPress(_)
                | EventType::ButtonRelease(_)
                | EventType::MouseMove { .. }
                | EventType::Wheel { .. } => {
                    *shared.lock().unwrap() = Some(Instant::now());
                }
            }) {
                warn!("input listener unavailable: {err:?}");
            }
        });

        Self { last_activity }
    }

    /// Seconds since the listener last saw an input event, or `None` if it
    /// has not seen one yet.
    pub fn idle_secs(&self) -> Option<u64> {
        self.last_activity
            .lock()
            .unwrap()
            .map(|instant| instant.elapsed().as_secs())
    }

    #[cfg(test)]
    pub(crate) fn mark_active(&self) {
        *self.last_activity.lock().unwrap() = Some(Instant::now());
    }
}
