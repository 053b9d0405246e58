use log::warn;
use std::process::Command;

use super::{PlatformProbe, UNKNOWN_APP};

/// macOS probe. The frontmost process comes from System Events via
/// `osascript`; idle time from the `HIDIdleTime` property of `IOHIDSystem`.
pub struct MacProbe;

impl MacProbe {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self)
    }
}

impl PlatformProbe for MacProbe {
    fn foreground_app(&self) -> String {
        let output = Command::new("osascript")
            .arg("-e")
            .arg("tell application \"System Events\" to get name of (processes where frontmost is true)")
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                match stdout.trim().split(',').next().map(str::trim) {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => UNKNOWN_APP.to_string(),
                }
            }
            Ok(output) => {
                warn!("osascript exited with {}", output.status);
                UNKNOWN_APP.to_string()
            }
            Err(err) => {
                warn!("failed to query frontmost process: {err}");
                UNKNOWN_APP.to_string()
            }
        }
    }

    fn idle_secs(&self) -> u64 {
        let output = Command::new("ioreg").args(["-c", "IOHIDSystem"]).output();

        match output {
            Ok(output) if output.status.success() => {
                parse_hid_idle_ns(&String::from_utf8_lossy(&output.stdout))
                    .map(|ns| ns / 1_000_000_000)
                    .unwrap_or(0)
            }
            Ok(output) => {
                warn!("ioreg exited with {}", output.status);
                0
            }
            Err(err) => {
                warn!("failed to query idle time: {err}");
                0
            }
        }
    }
}

/// Pulls the nanosecond `HIDIdleTime` value out of `ioreg` output.
fn parse_hid_idle_ns(output: &str) -> Option<u64> {
    output
        .lines()
        .find(|line| line.contains("HIDIdleTime"))
        .and_then(|line| line.split('=').nth(1))
        .and_then(|value| value.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_idle_time_from_ioreg_output() {
        let output = r#"
  | |   "HIDParameters" = {...}
  | |   "HIDIdleTime" = 2500000000
  | |   "HIDPointerAcceleration" = 45056
"#;
        assert_eq!(parse_hid_idle_ns(output), Some(2_500_000_000));
    }

    #[test]
    fn missing_idle_property_yields_none() {
        assert_eq!(parse_hid_idle_ns("no such property here"), None);
    }

    #[test]
    fn garbage_value_yields_none() {
        assert_eq!(parse_hid_idle_ns("\"HIDIdleTime\" = banana"), None);
    }
}
