//! The fixed-cadence driver.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::PresentationError;
use crate::events::FrameNotice;
use crate::instance::{Advance, Cadence};
use crate::registry::Registry;
use crate::sink::PresentationSink;
use crate::world::WorldView;

/// What one tick did. Notices are the previous tick's: lifecycle
/// notifications reach observers one tick after they arise, matching the
/// host's redispatch delay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub advanced: usize,
    pub idle: usize,
    pub notices: Vec<FrameNotice>,
}

impl TickReport {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.advanced == 0 && self.notices.is_empty()
    }
}

/// Drives `advance()` across a registry at two fixed cadences: fast
/// instances every call, slow instances every `slow_divisor` calls.
#[derive(Debug)]
pub struct TickDispatcher {
    tick: u64,
    slow_divisor: u64,
    max_notices: usize,
    pending: Vec<FrameNotice>,
}

impl TickDispatcher {
    pub fn new(config: &Config) -> Result<Self, PresentationError> {
        if config.slow_divisor == 0 {
            return Err(PresentationError::InvalidConfig {
                reason: "slow_divisor must be at least 1".into(),
            });
        }
        Ok(Self {
            tick: 0,
            slow_divisor: u64::from(config.slow_divisor),
            max_notices: config.max_notices_per_tick,
            pending: Vec::new(),
        })
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Run one host tick. Iteration order within a cadence is unspecified
    /// and must not be relied on.
    pub fn tick(
        &mut self,
        registry: &mut Registry,
        sink: &mut dyn PresentationSink,
        world: &dyn WorldView,
    ) -> TickReport {
        self.tick = self.tick.wrapping_add(1);
        let delivered = std::mem::take(&mut self.pending);

        let mut advanced = 0;
        let mut idle = 0;
        let mut collected: Vec<FrameNotice> = Vec::new();

        let slow_due = self.tick % self.slow_divisor == 0;
        let mut run = |cadence: Cadence, collected: &mut Vec<FrameNotice>| {
            let (mut a, mut i) = (0, 0);
            for instance in registry.iter_cadence_mut(cadence) {
                match instance.advance(sink, world) {
                    Advance::Applied { .. } => a += 1,
                    Advance::Idle => i += 1,
                }
                collected.extend(instance.take_notices());
            }
            (a, i)
        };

        let (a, i) = run(Cadence::Fast, &mut collected);
        advanced += a;
        idle += i;
        if slow_due {
            let (a, i) = run(Cadence::Slow, &mut collected);
            advanced += a;
            idle += i;
        }

        if collected.len() > self.max_notices {
            warn!(
                "dropping {} notices over the per-tick limit",
                collected.len() - self.max_notices
            );
            collected.truncate(self.max_notices);
        }
        self.pending = collected;

        TickReport {
            tick: self.tick,
            advanced,
            idle,
            notices: delivered,
        }
    }
}
