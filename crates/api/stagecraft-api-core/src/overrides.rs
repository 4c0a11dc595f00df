//! Keyed per-viewer overrides produced by computed presentations.
//!
//! A computed frame is a map from override key to override op. Keys make
//! the frame diffable across ticks: anything present last tick but absent
//! now is restored to the real world state in the same advance.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::content::Content;
use crate::geometry::BlockPos;
use crate::ids::TargetId;

/// What a computed override is keyed by.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OverrideKey {
    Pos(BlockPos),
    Target(TargetId),
}

/// The override applied at a key while it is live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OverrideOp {
    /// Show this content instead of the real block.
    Content(Content),
    /// Hide the target entity from the viewer.
    Hidden,
}

/// One computed frame for one viewer.
pub type OverrideFrame = HashMap<OverrideKey, OverrideOp>;
