pub mod input;
pub mod models;
pub mod platform;
pub mod reminder;
pub mod settings;
pub mod store;
pub mod tracker;
pub mod utils;

pub use models::SessionState;
pub use platform::{NativeProbe, PlatformProbe, UNKNOWN_APP};
pub use reminder::{CannedContent, LogPresenter, ReminderContent, ReminderPresenter};
pub use settings::Settings;
pub use store::StatsStore;
pub use tracker::{TrackerController, TrackerDeps};
