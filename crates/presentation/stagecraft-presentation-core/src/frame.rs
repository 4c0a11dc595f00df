//! Static frames and frame sequences.

use serde::{Deserialize, Serialize};
use stagecraft_api_core::{
    BarFrame, BlockPos, ContentChange, Orientation, OverrideKey, OverrideOp, TargetId, Vec3,
    ViewerId,
};

use crate::error::PresentationError;
use crate::key::InstanceKey;
use crate::sink::PresentationSink;

/// One sidebar line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLine {
    pub index: u8,
    pub text: String,
}

/// One unit of displayable content; a closed variant per sink operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FramePayload {
    Text(String),
    Bar(BarFrame),
    ContentChanges(Vec<(BlockPos, ContentChange)>),
    Visibility(Vec<(TargetId, bool)>),
    BoardLines(Vec<BoardLine>),
    CameraPose {
        position: Vec3,
        orientation: Orientation,
    },
}

impl FramePayload {
    /// Render this frame to one viewer.
    pub(crate) fn apply(&self, key: &InstanceKey, viewer: ViewerId, sink: &mut dyn PresentationSink) {
        match self {
            Self::Text(text) => sink.send_ephemeral_text(viewer, text),
            Self::Bar(frame) => sink.apply_bar_frame(viewer, frame),
            Self::ContentChanges(changes) => {
                for (pos, change) in changes {
                    sink.send_content_change(viewer, *pos, change);
                }
            }
            Self::Visibility(targets) => {
                for (target, visible) in targets {
                    sink.set_visibility(viewer, *target, *visible);
                }
            }
            Self::BoardLines(lines) => {
                let board = key.board_label();
                for line in lines {
                    sink.update_board_line(&board, viewer, line.index, &line.text);
                }
            }
            Self::CameraPose {
                position,
                orientation,
            } => sink.teleport_viewer(viewer, *position, *orientation),
        }
    }

    /// Overrides this frame durably installs on the client (or clears when
    /// the op is `None`). Text, bar, board and camera frames are transient
    /// and install nothing.
    pub(crate) fn durable_overrides(&self) -> Vec<(OverrideKey, Option<OverrideOp>)> {
        match self {
            Self::ContentChanges(changes) => changes
                .iter()
                .map(|(pos, change)| {
                    let op = match change {
                        ContentChange::Override(content) => {
                            Some(OverrideOp::Content(content.clone()))
                        }
                        ContentChange::Restore => None,
                    };
                    (OverrideKey::Pos(*pos), op)
                })
                .collect(),
            Self::Visibility(targets) => targets
                .iter()
                .map(|(target, visible)| {
                    let op = if *visible { None } else { Some(OverrideOp::Hidden) };
                    (OverrideKey::Target(*target), op)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// An ordered, finite, cyclic sequence of static frames.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSequence {
    frames: Vec<FramePayload>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `payload` repeated `repeat` times. A repeat of zero is a
    /// caller bug and is rejected rather than silently dropped.
    pub fn push(&mut self, payload: FramePayload, repeat: u32) -> Result<(), PresentationError> {
        if repeat == 0 {
            return Err(PresentationError::InvalidRepeat);
        }
        for _ in 1..repeat {
            self.frames.push(payload.clone());
        }
        self.frames.push(payload);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FramePayload> {
        self.frames.get(index)
    }

    /// Replace the frame at `index`.
    pub fn set(&mut self, index: usize, payload: FramePayload) -> Result<(), PresentationError> {
        let len = self.frames.len();
        match self.frames.get_mut(index) {
            Some(slot) => {
                *slot = payload;
                Ok(())
            }
            None => Err(PresentationError::FrameIndexOutOfRange { index, len }),
        }
    }

    /// Append all frames of `other`, preserving order.
    pub fn append(&mut self, other: FrameSequence) {
        self.frames.extend(other.frames);
    }

    /// Drop all frames and install `other` in their place.
    pub fn replace(&mut self, other: FrameSequence) {
        self.frames = other.frames;
    }
}
