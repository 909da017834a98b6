//! Responsive enable/disable gate.
//!
//! The gate is evaluated once at startup. If it starts disabled and the
//! host can report media-query changes, an upward crossing re-enables it.
//! A downward crossing is never acted on, whether the gate started enabled
//! or was re-enabled later: once animations are on they stay on for the
//! page's lifetime.

/// Whether animations are currently allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Viewport at or above the threshold.
    Enabled,
    /// Viewport below the threshold; elements render in their final state.
    Disabled,
}

/// What the coordinator must do after a width change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    /// Restore the enabling marker and schedule a catch-up scan.
    Reenable,
}

/// Minimum-width gate.
#[derive(Debug, Clone)]
pub struct ResponsiveGate {
    min_width: u32,
    state: GateState,
    listening: bool,
}

impl ResponsiveGate {
    /// Evaluate the gate from the startup media-query match.
    ///
    /// `media_change` reports whether the host can deliver live change
    /// events; without it a disabled gate stays disabled.
    #[must_use]
    pub const fn new(min_width: u32, matches: bool, media_change: bool) -> Self {
        let state = if matches {
            GateState::Enabled
        } else {
            GateState::Disabled
        };
        Self {
            min_width,
            state,
            listening: !matches && media_change,
        }
    }

    /// Threshold in CSS pixels.
    #[must_use]
    pub const fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Whether width changes are being acted on.
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.listening
    }

    /// Handle a media-query change.
    ///
    /// Every upward report re-enables, even when already enabled; the
    /// follow-up scan is idempotent. Downward reports are ignored.
    pub fn on_width_changed(&mut self, matches: bool) -> Option<GateTransition> {
        if !self.listening || !matches {
            return None;
        }
        self.state = GateState::Enabled;
        Some(GateTransition::Reenable)
    }
}
