//! Shared test doubles for the stagecraft workspace: a sink that records
//! every call and an in-memory world snapshot.

use std::collections::HashSet;

use hashbrown::HashMap;

use stagecraft_api_core::{
    BarFrame, BlockPos, Content, ContentChange, Orientation, TargetId, Vec3, ViewerId,
};
use stagecraft_presentation_core::{PresentationSink, WorldView};

/// One recorded sink invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum SinkCall {
    Text {
        viewer: ViewerId,
        text: String,
    },
    Bar {
        viewer: ViewerId,
        frame: BarFrame,
    },
    ContentChange {
        viewer: ViewerId,
        pos: BlockPos,
        change: ContentChange,
    },
    Visibility {
        viewer: ViewerId,
        target: TargetId,
        visible: bool,
    },
    BoardLine {
        board: String,
        viewer: ViewerId,
        line_index: u8,
        text: String,
    },
    Teleport {
        viewer: ViewerId,
        position: Vec3,
        orientation: Orientation,
    },
}

/// Records every sink call in order; viewers can be marked unreachable to
/// exercise the skip-on-disconnect path.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
    unreachable: HashSet<ViewerId>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disconnect(&mut self, viewer: ViewerId) {
        self.unreachable.insert(viewer);
    }

    pub fn reconnect(&mut self, viewer: ViewerId) {
        self.unreachable.remove(&viewer);
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Calls addressed to one viewer, in order.
    pub fn calls_for(&self, viewer: ViewerId) -> Vec<&SinkCall> {
        self.calls
            .iter()
            .filter(|call| match call {
                SinkCall::Text { viewer: v, .. }
                | SinkCall::Bar { viewer: v, .. }
                | SinkCall::ContentChange { viewer: v, .. }
                | SinkCall::Visibility { viewer: v, .. }
                | SinkCall::BoardLine { viewer: v, .. }
                | SinkCall::Teleport { viewer: v, .. } => *v == viewer,
            })
            .collect()
    }

    /// Texts rendered so far, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SinkCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Count of content restores sent so far.
    pub fn restore_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    SinkCall::ContentChange {
                        change: ContentChange::Restore,
                        ..
                    }
                )
            })
            .count()
    }

    /// Count of content overrides sent so far.
    pub fn override_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    SinkCall::ContentChange {
                        change: ContentChange::Override(_),
                        ..
                    }
                )
            })
            .count()
    }
}

impl PresentationSink for RecordingSink {
    fn send_ephemeral_text(&mut self, viewer: ViewerId, text: &str) {
        self.calls.push(SinkCall::Text {
            viewer,
            text: text.to_string(),
        });
    }

    fn apply_bar_frame(&mut self, viewer: ViewerId, frame: &BarFrame) {
        self.calls.push(SinkCall::Bar {
            viewer,
            frame: frame.clone(),
        });
    }

    fn send_content_change(&mut self, viewer: ViewerId, pos: BlockPos, change: &ContentChange) {
        self.calls.push(SinkCall::ContentChange {
            viewer,
            pos,
            change: change.clone(),
        });
    }

    fn set_visibility(&mut self, viewer: ViewerId, target: TargetId, visible: bool) {
        self.calls.push(SinkCall::Visibility {
            viewer,
            target,
            visible,
        });
    }

    fn update_board_line(&mut self, board: &str, viewer: ViewerId, line_index: u8, text: &str) {
        self.calls.push(SinkCall::BoardLine {
            board: board.to_string(),
            viewer,
            line_index,
            text: text.to_string(),
        });
    }

    fn teleport_viewer(&mut self, viewer: ViewerId, position: Vec3, orientation: Orientation) {
        self.calls.push(SinkCall::Teleport {
            viewer,
            position,
            orientation,
        });
    }

    fn is_reachable(&self, viewer: ViewerId) -> bool {
        !self.unreachable.contains(&viewer)
    }
}

/// In-memory world snapshot: sparse content over a uniform base, plus
/// viewer positions.
#[derive(Clone, Debug)]
pub struct MemoryWorld {
    base: Content,
    content: HashMap<BlockPos, Content>,
    positions: HashMap<ViewerId, BlockPos>,
}

impl MemoryWorld {
    pub fn filled_with(base: Content) -> Self {
        Self {
            base,
            content: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    pub fn set_content(&mut self, pos: BlockPos, content: Content) {
        self.content.insert(pos, content);
    }

    pub fn place_viewer(&mut self, viewer: ViewerId, pos: BlockPos) {
        self.positions.insert(viewer, pos);
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::filled_with(Content::new("stone"))
    }
}

impl WorldView for MemoryWorld {
    fn content_at(&self, pos: BlockPos) -> Content {
        self.content.get(&pos).cloned().unwrap_or_else(|| self.base.clone())
    }

    fn viewer_position(&self, viewer: ViewerId) -> Option<BlockPos> {
        self.positions.get(&viewer).copied()
    }
}
