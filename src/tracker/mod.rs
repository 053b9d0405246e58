pub mod classifier;
pub mod controller;
pub mod loop_worker;

pub use classifier::{classify, ActivityState, Transition};
pub use controller::TrackerController;
pub use loop_worker::TrackerDeps;
