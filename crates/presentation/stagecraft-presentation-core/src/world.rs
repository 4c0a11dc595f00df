//! Read-only world state consumed by computed presentations.
//!
//! Hosts may assemble this snapshot off the logic thread (bulk region
//! reads are allowed on a worker pool), but the engine only ever consumes
//! it synchronously from `advance()`; all mutation stays on the sink.

use stagecraft_api_core::{BlockPos, Content, ViewerId};

pub trait WorldView {
    /// Real content at a position.
    fn content_at(&self, pos: BlockPos) -> Content;

    /// Current block position of a viewer, if known to the host.
    fn viewer_position(&self, viewer: ViewerId) -> Option<BlockPos>;
}

/// A world with no viewers and uniform content; used where a static-only
/// registry is advanced without any computed instances.
#[derive(Clone, Debug, Default)]
pub struct EmptyWorld;

impl WorldView for EmptyWorld {
    fn content_at(&self, _pos: BlockPos) -> Content {
        Content::new("air")
    }

    fn viewer_position(&self, _viewer: ViewerId) -> Option<BlockPos> {
        None
    }
}
