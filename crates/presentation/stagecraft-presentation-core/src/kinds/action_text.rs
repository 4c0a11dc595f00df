//! Animated action-bar text, one singleton per viewer.

use stagecraft_api_core::ViewerId;

use crate::error::PresentationError;
use crate::frame::{FramePayload, FrameSequence};
use crate::instance::{Cadence, FrameSource, PresentationInstance};
use crate::key::InstanceKey;
use crate::registry::Registry;
use crate::sink::PresentationSink;

/// Builder for cycling action-bar text. Keyed by the viewer's own
/// identity; re-registering appends the new frames to the running cycle.
#[derive(Clone, Debug)]
pub struct ActionText {
    viewer: ViewerId,
    frames: Vec<(String, u32)>,
    extra_viewers: Vec<ViewerId>,
    start_playing: bool,
}

impl ActionText {
    pub fn for_viewer(viewer: ViewerId) -> Self {
        Self {
            viewer,
            frames: Vec::new(),
            extra_viewers: Vec::new(),
            start_playing: false,
        }
    }

    /// Show `text` for `repeat` consecutive ticks.
    pub fn add_frame(mut self, text: impl Into<String>, repeat: u32) -> Self {
        self.frames.push((text.into(), repeat));
        self
    }

    /// Let another viewer spectate this text cycle.
    pub fn add_viewer(mut self, viewer: ViewerId) -> Self {
        self.extra_viewers.push(viewer);
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
        for (text, repeat) in &self.frames {
            sequence.push(FramePayload::Text(text.clone()), *repeat)?;
        }
        if sequence.is_empty() {
            return Err(PresentationError::EmptyFrames);
        }

        let key = InstanceKey::Viewer(self.viewer);
        let appended = sequence.clone();
        let instance = registry.register_with(
            key.clone(),
            || PresentationInstance::new(key, Cadence::Fast, FrameSource::Static(sequence)),
            |existing| existing.append_static_frames(appended),
        );

        let mut viewers = vec![self.viewer];
        viewers.extend(self.extra_viewers);
        super::finish(instance, viewers, self.start_playing, sink)?;
        Ok(instance)
    }
}
