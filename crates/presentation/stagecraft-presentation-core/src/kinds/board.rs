//! Sidebar scoreboards, keyed by name.

use stagecraft_api_core::ViewerId;

use crate::error::PresentationError;
use crate::frame::{BoardLine, FramePayload, FrameSequence};
use crate::instance::{Cadence, FrameSource, PresentationInstance};
use crate::key::InstanceKey;
use crate::registry::Registry;
use crate::sink::PresentationSink;

/// Sidebar boards render at most this many lines.
pub const MAX_BOARD_LINES: u8 = 15;

/// Builder for a named sidebar board. Boards run on the slow cadence;
/// re-registering a name replaces the line frames wholesale, so callers
/// can push a new layout without stopping the board.
#[derive(Clone, Debug)]
pub struct SidebarBoard {
    name: String,
    frames: Vec<(Vec<BoardLine>, u32)>,
    viewers: Vec<ViewerId>,
    start_playing: bool,
}

impl SidebarBoard {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
            viewers: Vec::new(),
            start_playing: false,
        }
    }

    /// One full set of lines, held for `repeat` slow advances.
    pub fn add_frame(mut self, lines: Vec<BoardLine>, repeat: u32) -> Self {
        self.frames.push((lines, repeat));
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
        for (lines, repeat) in &self.frames {
            for line in lines {
                if line.index >= MAX_BOARD_LINES {
                    return Err(PresentationError::LineIndexOutOfRange {
                        index: line.index,
                        max: MAX_BOARD_LINES - 1,
                    });
                }
            }
            sequence.push(FramePayload::BoardLines(lines.clone()), *repeat)?;
        }
        if sequence.is_empty() {
            return Err(PresentationError::EmptyFrames);
        }

        let key = InstanceKey::named(self.name);
        let replacement = sequence.clone();
        let instance = registry.register_with(
            key.clone(),
            || PresentationInstance::new(key, Cadence::Slow, FrameSource::Static(sequence)),
            |existing| existing.set_static_frames(replacement),
        );

        super::finish(instance, self.viewers, self.start_playing, sink)?;
        Ok(instance)
    }
}
