//! Event logging for tracker actions.
//!
//! Actions the user would recognize ("Idle started", "Reminder shown") go
//! through [`log_action`] so they share one `event: detail` shape in the log
//! stream. Logging is side-effect only and never fails the caller.

/// Logs a tracker event with an optional detail string.
pub fn log_action(event: &str, detail: &str) {
    if detail.is_empty() {
        log::info!("{event}");
    } else {
        log::info!("{event}: {detail}");
    }
}
