//! Lifecycle events and per-instance dispatch.
//!
//! Pre-transition events are a closed tagged union dispatched
//! synchronously; the return value carries cancellation, so no global
//! event bus is involved. Post-transition notices are buffered on the
//! instance and delivered by the dispatcher one tick after they arise.

use serde::{Deserialize, Serialize};
use stagecraft_api_core::{OverrideFrame, ViewerId};

use crate::frame::FramePayload;
use crate::key::InstanceKey;

/// Cancellable pre-transition notifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    ViewerAdd { key: InstanceKey, viewer: ViewerId },
    ViewerRemove { key: InstanceKey, viewer: ViewerId },
    Play { key: InstanceKey },
    Pause { key: InstanceKey },
    Stop { key: InstanceKey },
}

/// Outcome of one handler invocation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EventDecision {
    Proceed,
    Cancel,
}

/// Non-cancellable post-transition notifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FrameNotice {
    /// A computed frame was produced for one viewer.
    FrameComputed {
        key: InstanceKey,
        viewer: ViewerId,
        overrides: OverrideFrame,
    },
    /// A static frame was rendered to the instance's audience.
    FrameApplied {
        key: InstanceKey,
        payload: FramePayload,
        viewers: usize,
    },
}

type LifecycleHandler = Box<dyn FnMut(&LifecycleEvent) -> EventDecision>;

/// Per-instance event plumbing: registered lifecycle handlers plus the
/// buffer of notices awaiting deferred delivery.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<LifecycleHandler>,
    notices: Vec<FrameNotice>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lifecycle handler. Handlers run in registration order.
    pub fn on_lifecycle(
        &mut self,
        handler: impl FnMut(&LifecycleEvent) -> EventDecision + 'static,
    ) {
        self.handlers.push(Box::new(handler));
    }

    /// Dispatch a pre-transition event. Every handler observes the event;
    /// a single `Cancel` wins.
    pub(crate) fn dispatch(&mut self, event: &LifecycleEvent) -> EventDecision {
        let mut decision = EventDecision::Proceed;
        for handler in &mut self.handlers {
            if handler(event) == EventDecision::Cancel {
                decision = EventDecision::Cancel;
            }
        }
        decision
    }

    pub(crate) fn push_notice(&mut self, notice: FrameNotice) {
        self.notices.push(notice);
    }

    /// Drain buffered notices; called by the tick dispatcher.
    pub(crate) fn take_notices(&mut self) -> Vec<FrameNotice> {
        std::mem::take(&mut self.notices)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .field("notices", &self.notices.len())
            .finish()
    }
}
