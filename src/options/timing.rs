use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
/// Timer windows used by the coordinator.
pub struct TimingOptions {
    /// Quiet period after the last DOM mutation before a rescan runs.
    #[schemars(title = "Rescan Debounce (ms)", range(min = 0, max = 5000))]
    pub rescan_debounce_ms: u64,
    /// Delay between an upward width crossing and the catch-up scan, giving
    /// layout time to settle.
    #[schemars(title = "Re-enable Delay (ms)", range(min = 0, max = 5000))]
    pub reenable_delay_ms: u64,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            rescan_debounce_ms: 250,
            reenable_delay_ms: 100,
        }
    }
}

impl TimingOptions {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub const fn rescan_debounce(&self) -> Duration {
        Duration::from_millis(self.rescan_debounce_ms)
    }

    /// Re-enable delay as a [`Duration`].
    #[must_use]
    pub const fn reenable_delay(&self) -> Duration {
        Duration::from_millis(self.reenable_delay_ms)
    }
}
