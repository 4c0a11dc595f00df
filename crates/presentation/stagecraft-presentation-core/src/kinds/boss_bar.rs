//! Animated boss bars, keyed by name.

use stagecraft_api_core::{BarFrame, ViewerId};

use crate::error::PresentationError;
use crate::frame::{FramePayload, FrameSequence};
use crate::instance::{Cadence, FrameSource, PresentationInstance};
use crate::key::InstanceKey;
use crate::registry::Registry;
use crate::sink::PresentationSink;

/// Builder for a named boss-bar loop. A name hosts at most one live loop;
/// re-registering an existing name only extends its audience and leaves
/// the running frame cycle untouched.
#[derive(Clone, Debug)]
pub struct BossBar {
    name: String,
    frames: Vec<(BarFrame, u32)>,
    viewers: Vec<ViewerId>,
    start_playing: bool,
}

impl BossBar {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
            viewers: Vec::new(),
            start_playing: false,
        }
    }

    /// Hold `frame` for `repeat` consecutive advances.
    pub fn add_frame(mut self, frame: BarFrame, repeat: u32) -> Self {
        self.frames.push((frame, repeat));
        self
    }

    pub fn add_viewer(mut self, viewer: ViewerId) -> Self {
        self.viewers.push(viewer);
        self
    }

    pub fn start_playing(mut self) -> Self {
        self.start_playing = true;
        self
    }

    pub fn build<'r>(
        self,
        registry: &'r mut Registry,
        sink: &mut dyn PresentationSink,
    ) -> Result<&'r mut PresentationInstance, PresentationError> {
        let mut sequence = FrameSequence::new();
        for (frame, repeat) in &self.frames {
            sequence.push(FramePayload::Bar(frame.clone()), *repeat)?;
        }
        if sequence.is_empty() {
            return Err(PresentationError::EmptyFrames);
        }

        let key = InstanceKey::named(self.name);
        let instance = registry.register_with(
            key.clone(),
            || PresentationInstance::new(key, Cadence::Fast, FrameSource::Static(sequence)),
            |_existing| {},
        );

        super::finish(instance, self.viewers, self.start_playing, sink)?;
        Ok(instance)
    }
}
