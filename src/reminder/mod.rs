pub mod content;
pub mod scheduler;

pub use content::{
    resolve_message, CannedContent, LogPresenter, ReminderContent, ReminderPresenter,
    FALLBACK_MESSAGE,
};
pub use scheduler::ReminderScheduler;
