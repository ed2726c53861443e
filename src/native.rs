//! Capability surface the original app got from its native shell: a haptic
//! pulse and a local notification. Both are best-effort and swallow their own
//! failures, so nothing in the core ever blocks on a missing capability. The
//! bridge is injected into the application rather than referenced globally,
//! which lets tests substitute a recording implementation.

use std::io::{self, Write};

use crossterm::tty::IsTty;

/// The two operations the core asks of its host environment.
pub trait NativeBridge {
    /// Whether the host can actually deliver feedback. Callers may use this
    /// to skip cosmetic work; calling the other methods anyway is always safe.
    fn is_available(&self) -> bool;

    /// Best-effort attention pulse. Fired after a successful commit or delete.
    fn vibrate(&self);

    /// Best-effort local notification. The terminal bridge degrades this to
    /// an audible cue; the application mirrors the body into its status
    /// region, which plays the role of the original's alert fallback.
    fn notify(&self, title: &str, body: &str);
}

/// Bridge backed by the controlling terminal. "Haptics" become the BEL
/// character, which most emulators render as a beep or a visual flash.
pub struct TerminalBridge;

impl TerminalBridge {
    fn ring(&self) {
        let mut stdout = io::stdout();
        // Errors are deliberately dropped: feedback must never take the app down.
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

impl NativeBridge for TerminalBridge {
    fn is_available(&self) -> bool {
        io::stdout().is_tty()
    }

    fn vibrate(&self) {
        if self.is_available() {
            self.ring();
        }
    }

    fn notify(&self, _title: &str, _body: &str) {
        if self.is_available() {
            self.ring();
        }
    }
}

/// Bridge that does nothing. Useful for tests and for running in environments
/// without a terminal worth beeping at.
pub struct NullBridge;

impl NativeBridge for NullBridge {
    fn is_available(&self) -> bool {
        false
    }

    fn vibrate(&self) {}

    fn notify(&self, _title: &str, _body: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both methods must be callable whether or not the capability is there;
    // unavailable just means nothing observable happens.
    #[test]
    fn bridges_never_fail_when_unavailable() {
        let bridges: [&dyn NativeBridge; 2] = [&NullBridge, &TerminalBridge];
        for bridge in bridges {
            bridge.vibrate();
            bridge.notify("DEBT TRACKER", "still here");
        }
        assert!(!NullBridge.is_available());
    }
}
