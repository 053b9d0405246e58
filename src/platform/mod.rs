#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

/// Reported when the foreground application cannot be determined.
pub const UNKNOWN_APP: &str = "Unknown";

/// OS-level signals the sampling loop polls once per tick.
///
/// Implementations swallow their own failures: `foreground_app` falls back to
/// [`UNKNOWN_APP`] and `idle_secs` to `0`, so a flaky query never aborts a
/// tick. One implementation per target OS, injected at startup.
pub trait PlatformProbe: Send + Sync {
    /// Name of the frontmost application, or [`UNKNOWN_APP`].
    fn foreground_app(&self) -> String;

    /// Seconds since the last OS input event, or `0` if unavailable.
    fn idle_secs(&self) -> u64;
}

#[cfg(target_os = "macos")]
pub use macos::MacProbe as NativeProbe;

#[cfg(target_os = "linux")]
pub use linux::LinuxProbe as NativeProbe;

// Stub for development on other platforms
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub struct NativeProbe;

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
impl NativeProbe {
    pub fn new() -> anyhow::Result<Self> {
        log::warn!("no platform probe for this OS, reporting {UNKNOWN_APP}");
        Ok(Self)
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
impl PlatformProbe for NativeProbe {
    fn foreground_app(&self) -> String {
        UNKNOWN_APP.to_string()
    }

    fn idle_secs(&self) -> u64 {
        0
    }
}
