//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Sizing hints and cadence settings for the dispatcher.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Slow-cadence instances advance once every this many ticks.
    pub slow_divisor: u32,
    /// Capacity hint for per-instance viewer sets.
    pub expected_viewers: usize,
    /// Maximum deferred notices retained per tick; overflow is dropped.
    pub max_notices_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slow_divisor: 20,
            expected_viewers: 16,
            max_notices_per_tick: 1024,
        }
    }
}
