//! Live presentation instances: frame cycling, viewer lifecycle, and the
//! pause/play/stop state machine.

use std::collections::HashMap;

use hashbrown::HashSet;
use log::warn;
use serde::{Deserialize, Serialize};
use stagecraft_api_core::{ContentChange, OverrideFrame, OverrideKey, OverrideOp, ViewerId};

use crate::computed::ComputedSource;
use crate::error::PresentationError;
use crate::events::{EventDecision, EventDispatcher, FrameNotice, LifecycleEvent};
use crate::frame::{FramePayload, FrameSequence};
use crate::key::InstanceKey;
use crate::sink::PresentationSink;
use crate::viewers::ViewerSet;
use crate::world::WorldView;

/// Which dispatcher pass advances this instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Cadence {
    /// Every host tick (~50 ms); latency-sensitive visuals.
    Fast,
    /// Every `slow_divisor` ticks (~1 s); heavier visuals.
    Slow,
}

/// Playback state machine. `Paused` is initial, `Stopped` is terminal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    Paused,
    Playing,
    Stopped,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paused => "paused",
            Self::Playing => "playing",
            Self::Stopped => "stopped",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Where an instance's frames come from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum FrameSource {
    Static(FrameSequence),
    Computed(ComputedSource),
}

impl FrameSource {
    fn is_empty(&self) -> bool {
        match self {
            Self::Static(seq) => seq.is_empty(),
            Self::Computed(_) => false,
        }
    }
}

/// Result of one `advance()` call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Advance {
    /// Paused, no frames, or no viewers; no side effects were performed.
    Idle,
    /// A frame was rendered to this many reachable viewers.
    Applied { viewers: usize },
}

/// One live presentation: identity, frames, audience, lifecycle.
#[derive(Debug)]
pub struct PresentationInstance {
    key: InstanceKey,
    cadence: Cadence,
    pub(crate) source: FrameSource,
    cursor: usize,
    state: PlaybackState,
    viewers: ViewerSet,
    events: EventDispatcher,
    /// Durable overrides currently shown to each viewer.
    applied: HashMap<ViewerId, OverrideFrame>,
    /// Keys protected from restoration until stop.
    trail: HashMap<ViewerId, HashSet<OverrideKey>>,
    pub(crate) stop_cancellable: bool,
}

impl PresentationInstance {
    /// New instance in the `Paused` state with an empty audience.
    pub fn new(key: InstanceKey, cadence: Cadence, source: FrameSource) -> Self {
        Self {
            key,
            cadence,
            source,
            cursor: 0,
            state: PlaybackState::Paused,
            viewers: ViewerSet::new(),
            events: EventDispatcher::new(),
            applied: HashMap::new(),
            trail: HashMap::new(),
            stop_cancellable: false,
        }
    }

    #[inline]
    pub fn key(&self) -> &InstanceKey {
        &self.key
    }

    #[inline]
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn viewers(&self) -> &ViewerSet {
        &self.viewers
    }

    /// Length of the static sequence; zero for computed sources.
    #[inline]
    pub fn frame_count(&self) -> usize {
        match &self.source {
            FrameSource::Static(seq) => seq.len(),
            FrameSource::Computed(_) => 0,
        }
    }

    /// Register a cancellable lifecycle handler on this instance.
    pub fn on_lifecycle(
        &mut self,
        handler: impl FnMut(&LifecycleEvent) -> EventDecision + 'static,
    ) {
        self.events.on_lifecycle(handler);
    }

    fn ensure_live(&self) -> Result<(), PresentationError> {
        if self.state.is_stopped() {
            return Err(PresentationError::InstanceStopped {
                key: self.key.to_string(),
            });
        }
        Ok(())
    }

    /// Subscribe a viewer. Fires the cancellable pre-add event; on
    /// proceed, the install effect (current frame, if playing) is applied
    /// before insertion. Returns false when a handler cancelled.
    pub fn add_viewer(
        &mut self,
        viewer: ViewerId,
        sink: &mut dyn PresentationSink,
    ) -> Result<bool, PresentationError> {
        self.ensure_live()?;
        if self.viewers.contains(&viewer) {
            return Err(PresentationError::DuplicateViewer { viewer });
        }
        let event = LifecycleEvent::ViewerAdd {
            key: self.key.clone(),
            viewer,
        };
        if self.events.dispatch(&event) == EventDecision::Cancel {
            return Ok(false);
        }
        if self.state.is_playing() {
            if let FrameSource::Static(seq) = &self.source {
                if let Some(payload) = seq.get(self.cursor) {
                    if sink.is_reachable(viewer) {
                        payload.apply(&self.key, viewer, sink);
                        record_durable(&mut self.applied, viewer, payload);
                    }
                }
            }
        }
        self.viewers.insert(viewer);
        Ok(true)
    }

    /// Unsubscribe a viewer. Fires the cancellable pre-remove event; on
    /// proceed, every override this viewer was shown is restored.
    pub fn remove_viewer(
        &mut self,
        viewer: ViewerId,
        sink: &mut dyn PresentationSink,
    ) -> Result<bool, PresentationError> {
        self.ensure_live()?;
        if !self.viewers.contains(&viewer) {
            return Err(PresentationError::ViewerNotFound { viewer });
        }
        let event = LifecycleEvent::ViewerRemove {
            key: self.key.clone(),
            viewer,
        };
        if self.events.dispatch(&event) == EventDecision::Cancel {
            return Ok(false);
        }
        self.restore_viewer(viewer, sink);
        self.viewers.remove(&viewer);
        Ok(true)
    }

    /// Remove every viewer, iterating a snapshot so handlers may mutate
    /// the live set.
    pub fn clear_viewers(
        &mut self,
        sink: &mut dyn PresentationSink,
    ) -> Result<(), PresentationError> {
        self.ensure_live()?;
        for viewer in self.viewers.snapshot() {
            if self.viewers.contains(&viewer) {
                self.remove_viewer(viewer, sink)?;
            }
        }
        Ok(())
    }

    /// Transition to `Playing`. Silent no-op when already playing; false
    /// when a handler cancelled.
    pub fn play(&mut self) -> Result<bool, PresentationError> {
        self.ensure_live()?;
        if self.state.is_playing() {
            return Ok(false);
        }
        let event = LifecycleEvent::Play {
            key: self.key.clone(),
        };
        if self.events.dispatch(&event) == EventDecision::Cancel {
            return Ok(false);
        }
        self.state = PlaybackState::Playing;
        Ok(true)
    }

    /// Transition to `Paused`. For computed sources, every viewer's
    /// current overrides are restored since no further advance will
    /// refresh them; trail-protected keys persist.
    pub fn pause(&mut self, sink: &mut dyn PresentationSink) -> Result<bool, PresentationError> {
        self.ensure_live()?;
        if !self.state.is_playing() {
            return Ok(false);
        }
        let event = LifecycleEvent::Pause {
            key: self.key.clone(),
        };
        if self.events.dispatch(&event) == EventDecision::Cancel {
            return Ok(false);
        }
        self.state = PlaybackState::Paused;
        if matches!(self.source, FrameSource::Computed(_)) {
            for viewer in self.viewers.snapshot() {
                if let Some(frame) = self.applied.remove(&viewer) {
                    let viewer_trail = self.trail.get(&viewer);
                    for okey in frame.keys() {
                        if !viewer_trail.is_some_and(|t| t.contains(okey)) {
                            restore_override(sink, viewer, okey);
                        }
                    }
                }
            }
        }
        Ok(true)
    }

    /// Replace the static frame at `index`.
    pub fn update_frame(
        &mut self,
        index: usize,
        payload: FramePayload,
    ) -> Result<(), PresentationError> {
        self.ensure_live()?;
        match &mut self.source {
            FrameSource::Static(seq) => seq.set(index, payload),
            FrameSource::Computed(_) => Err(PresentationError::ComputedSource {
                key: self.key.to_string(),
            }),
        }
    }

    /// Advance one frame. Idle (no side effects) unless playing with at
    /// least one frame and one viewer.
    pub fn advance(&mut self, sink: &mut dyn PresentationSink, world: &dyn WorldView) -> Advance {
        if !self.state.is_playing() || self.viewers.is_empty() || self.source.is_empty() {
            return Advance::Idle;
        }
        let Self {
            key,
            source,
            cursor,
            viewers,
            events,
            applied,
            trail,
            ..
        } = self;
        match source {
            FrameSource::Static(seq) => {
                let Some(payload) = seq.get(*cursor).cloned() else {
                    return Advance::Idle;
                };
                let mut rendered = 0;
                for viewer in viewers.snapshot() {
                    if !sink.is_reachable(viewer) {
                        warn!("skipping unreachable viewer {viewer} for {key}");
                        continue;
                    }
                    payload.apply(key, viewer, sink);
                    record_durable(applied, viewer, &payload);
                    rendered += 1;
                }
                events.push_notice(FrameNotice::FrameApplied {
                    key: key.clone(),
                    payload,
                    viewers: rendered,
                });
                *cursor = (*cursor + 1) % seq.len();
                Advance::Applied { viewers: rendered }
            }
            FrameSource::Computed(strategy) => {
                let mut rendered = 0;
                for viewer in viewers.snapshot() {
                    if !sink.is_reachable(viewer) {
                        warn!("skipping unreachable viewer {viewer} for {key}");
                        continue;
                    }
                    let current = strategy.compute(viewer, world);
                    for (okey, op) in current.iter() {
                        apply_override(sink, viewer, okey, op);
                    }
                    // Anything shown last tick but gone now is restored in
                    // the same advance unless the trail protects it.
                    if let Some(last) = applied.get(&viewer) {
                        let viewer_trail = trail.get(&viewer);
                        for okey in last.keys() {
                            if !current.contains_key(okey)
                                && !viewer_trail.is_some_and(|t| t.contains(okey))
                            {
                                restore_override(sink, viewer, okey);
                            }
                        }
                    }
                    if strategy.leaves_trail() {
                        trail
                            .entry(viewer)
                            .or_default()
                            .extend(current.keys().copied());
                    }
                    events.push_notice(FrameNotice::FrameComputed {
                        key: key.clone(),
                        viewer,
                        overrides: current.clone(),
                    });
                    applied.insert(viewer, current);
                    rendered += 1;
                }
                Advance::Applied { viewers: rendered }
            }
        }
    }

    /// Restore every override a viewer was shown: the union of the
    /// last-applied frame and the trail set, each key exactly once.
    /// Returns the number of restored keys.
    fn restore_viewer(&mut self, viewer: ViewerId, sink: &mut dyn PresentationSink) -> usize {
        let mut keys: HashSet<OverrideKey> = HashSet::new();
        if let Some(frame) = self.applied.remove(&viewer) {
            keys.extend(frame.keys().copied());
        }
        if let Some(trailed) = self.trail.remove(&viewer) {
            keys.extend(trailed);
        }
        for okey in &keys {
            restore_override(sink, viewer, okey);
        }
        keys.len()
    }

    /// Stop this instance: fire the stop event (vetoable only when the
    /// kind opted in), restore all viewers, clear the audience, and mark
    /// terminal. The registry removes the entry when this returns true.
    pub(crate) fn stop_internal(&mut self, sink: &mut dyn PresentationSink) -> bool {
        if self.state.is_stopped() {
            return true;
        }
        let event = LifecycleEvent::Stop {
            key: self.key.clone(),
        };
        let decision = self.events.dispatch(&event);
        if self.stop_cancellable && decision == EventDecision::Cancel {
            return false;
        }
        for viewer in self.viewers.snapshot() {
            self.restore_viewer(viewer, sink);
        }
        self.viewers.clear();
        self.state = PlaybackState::Stopped;
        true
    }

    pub(crate) fn take_notices(&mut self) -> Vec<FrameNotice> {
        self.events.take_notices()
    }

    /// Append frames to a static sequence (merge policy of animated text).
    pub(crate) fn append_static_frames(&mut self, frames: FrameSequence) {
        if let FrameSource::Static(seq) = &mut self.source {
            seq.append(frames);
        }
    }

    /// Swap out a static sequence wholesale; the cursor restarts so it
    /// stays within the new bounds.
    pub(crate) fn set_static_frames(&mut self, frames: FrameSequence) {
        if let FrameSource::Static(seq) = &mut self.source {
            *seq = frames;
            self.cursor = 0;
        }
    }

    pub(crate) fn computed_mut(&mut self) -> Option<&mut ComputedSource> {
        match &mut self.source {
            FrameSource::Computed(strategy) => Some(strategy),
            FrameSource::Static(_) => None,
        }
    }
}

fn record_durable(
    applied: &mut HashMap<ViewerId, OverrideFrame>,
    viewer: ViewerId,
    payload: &FramePayload,
) {
    for (okey, op) in payload.durable_overrides() {
        let frame = applied.entry(viewer).or_default();
        match op {
            Some(op) => {
                frame.insert(okey, op);
            }
            None => {
                frame.remove(&okey);
            }
        }
    }
}

fn apply_override(
    sink: &mut dyn PresentationSink,
    viewer: ViewerId,
    okey: &OverrideKey,
    op: &OverrideOp,
) {
    match (okey, op) {
        (OverrideKey::Pos(pos), OverrideOp::Content(content)) => {
            sink.send_content_change(viewer, *pos, &ContentChange::Override(content.clone()));
        }
        (OverrideKey::Target(target), OverrideOp::Hidden) => {
            sink.set_visibility(viewer, *target, false);
        }
        // Key and op kinds are paired by construction.
        _ => {}
    }
}

fn restore_override(sink: &mut dyn PresentationSink, viewer: ViewerId, okey: &OverrideKey) {
    match okey {
        OverrideKey::Pos(pos) => {
            sink.send_content_change(viewer, *pos, &ContentChange::Restore);
        }
        OverrideKey::Target(target) => {
            sink.set_visibility(viewer, *target, true);
        }
    }
}
