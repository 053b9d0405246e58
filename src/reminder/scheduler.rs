/// Threshold-crossing counter for break reminders.
///
/// Counts accumulated *active* seconds, not wall-clock time: idle and paused
/// ticks never feed it, so an hour-long reminder really means an hour of use.
#[derive(Debug)]
pub struct ReminderScheduler {
    threshold_secs: u64,
    since_last_reminder: u64,
}

impl ReminderScheduler {
    pub fn new(threshold_secs: u64) -> Self {
        Self {
            threshold_secs,
            since_last_reminder: 0,
        }
    }

    /// Feeds one active tick into the counter. Returns true when the
    /// threshold is crossed; the counter resets to zero at that point.
    pub fn record_active(&mut self, delta_secs: u64) -> bool {
        self.since_last_reminder += delta_secs;
        if self.since_last_reminder >= self.threshold_secs {
            self.since_last_reminder = 0;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn pending_secs(&self) -> u64 {
        self.since_last_reminder
    }
}
