use anyhow::{Context as _, Result};
use log::warn;
use x11rb::connection::Connection;
use x11rb::protocol::screensaver;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt, Window};

use super::{PlatformProbe, UNKNOWN_APP};

/// X11 probe. The foreground app comes from `_NET_ACTIVE_WINDOW` plus
/// `WM_CLASS`; idle time from the MIT screensaver extension.
pub struct LinuxProbe {
    conn: x11rb::rust_connection::RustConnection,
    root: Window,
}

impl LinuxProbe {
    pub fn new() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X server")?;
        let root = conn.setup().roots[screen_num].root;
        Ok(Self { conn, root })
    }

    fn atom(&self, name: &str) -> Option<u32> {
        self.conn
            .intern_atom(false, name.as_bytes())
            .ok()?
            .reply()
            .ok()
            .map(|reply| reply.atom)
    }

    fn window_property(&self, window: Window, atom: u32) -> Option<String> {
        let reply = self
            .conn
            .get_property(false, window, atom, AtomEnum::ANY, 0, 1024)
            .ok()?
            .reply()
            .ok()?;

        if reply.value.is_empty() {
            return None;
        }

        String::from_utf8(reply.value).ok()
    }

    fn active_window_id(&self) -> Option<Window> {
        let atom = self.atom("_NET_ACTIVE_WINDOW")?;
        let reply = self
            .conn
            .get_property(false, self.root, atom, AtomEnum::WINDOW, 0, 1)
            .ok()?
            .reply()
            .ok()?;

        if reply.value.len() >= 4 {
            Some(u32::from_ne_bytes([
                reply.value[0],
                reply.value[1],
                reply.value[2],
                reply.value[3],
            ]))
        } else {
            None
        }
    }

    fn try_foreground_app(&self) -> Option<String> {
        let window_id = self.active_window_id()?;
        // WM_CLASS holds instance\0class\0; the instance name is enough here.
        self.window_property(window_id, AtomEnum::WM_CLASS.into())
            .and_then(|value| value.split('\0').next().map(str::to_string))
            .filter(|name| !name.is_empty())
    }
}

impl PlatformProbe for LinuxProbe {
    fn foreground_app(&self) -> String {
        match self.try_foreground_app() {
            Some(name) => name,
            None => {
                warn!("could not resolve the active window, reporting {UNKNOWN_APP}");
                UNKNOWN_APP.to_string()
            }
        }
    }

    fn idle_secs(&self) -> u64 {
        let info = screensaver::query_info(&self.conn, self.root)
            .ok()
            .and_then(|cookie| cookie.reply().ok());

        info.map(|info| (info.ms_since_user_input / 1000) as u64)
            .unwrap_or(0)
    }
}
