use anyhow::Result;
use log::warn;
use rand::seq::SliceRandom;

/// Shown whenever the content source fails; a reminder is never skipped
/// because its text could not be produced.
pub const FALLBACK_MESSAGE: &str = "Time to take a break!";

/// Produces the text for a break reminder. Implementations may fail (e.g. a
/// remote generator); callers substitute [`FALLBACK_MESSAGE`] instead.
pub trait ReminderContent: Send + Sync {
    fn generate(&self) -> Result<String>;
}

/// Displays a reminder to the user. Fire-and-forget: the sampling loop bounds
/// the call with a timeout, so implementations should not block for long.
pub trait ReminderPresenter: Send + Sync {
    fn show(&self, message: &str);
}

const MESSAGES: &[&str] = &[
    "Time to take a break!",
    "Stand up and stretch for a minute.",
    "Rest your eyes: look at something far away.",
    "Grab a glass of water.",
    "Step away from the screen for a moment.",
];

/// Default content source: picks a message from a built-in list.
#[derive(Debug, Default)]
pub struct CannedContent;

impl ReminderContent for CannedContent {
    fn generate(&self) -> Result<String> {
        let message = MESSAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_MESSAGE);
        Ok(message.to_string())
    }
}

/// Default presenter: writes the reminder to the log. Real notification UIs
/// plug in through [`ReminderPresenter`].
#[derive(Debug, Default)]
pub struct LogPresenter;

impl ReminderPresenter for LogPresenter {
    fn show(&self, message: &str) {
        log::info!("REMINDER: {message}");
    }
}

/// Resolves reminder text from a content source, falling back to the static
/// message when generation fails.
pub fn resolve_message(content: &dyn ReminderContent) -> String {
    match content.generate() {
        Ok(message) => message,
        Err(err) => {
            warn!("reminder content failed, using fallback: {err:?}");
            FALLBACK_MESSAGE.to_string()
        }
    }
}
