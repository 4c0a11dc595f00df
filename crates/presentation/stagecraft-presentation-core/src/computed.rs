//! Computed-frame strategies.
//!
//! A computed instance has no static sequence; each advance derives a
//! fresh `OverrideFrame` per viewer from live world state. Results are
//! never cached across ticks: the instance diffs consecutive frames and
//! restores whatever disappeared.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use stagecraft_api_core::{Content, OverrideFrame, OverrideKey, OverrideOp, TargetId, ViewerId};

use crate::scan::scan_region;
use crate::world::WorldView;

/// Block illusion around a moving viewer: every matching position inside
/// the scan region is shown as `mask` instead of its real content.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionMask {
    /// Content shown at every masked position.
    pub mask: Content,
    /// Real content that gets masked; empty means everything.
    pub matches: HashSet<Content>,
    /// Exception rules: real content never masked.
    pub exceptions: HashSet<Content>,
    /// Chebyshev radius of the scan cube.
    pub extents: u32,
    /// Inner hole radius; positions closer than this stay untouched.
    pub min_distance: u32,
    /// When set, positions once masked stay masked until stop.
    pub trail: bool,
}

impl RegionMask {
    fn compute(&self, viewer: ViewerId, world: &dyn WorldView) -> OverrideFrame {
        let mut frame = OverrideFrame::new();
        let Some(center) = world.viewer_position(viewer) else {
            return frame;
        };
        for pos in scan_region(center, self.extents, self.min_distance) {
            let real = world.content_at(pos);
            if self.exceptions.contains(&real) {
                continue;
            }
            if !self.matches.is_empty() && !self.matches.contains(&real) {
                continue;
            }
            frame.insert(OverrideKey::Pos(pos), OverrideOp::Content(self.mask.clone()));
        }
        frame
    }
}

/// Entity-visibility mask: the configured targets are hidden from the
/// viewer while the instance plays.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HiddenTargets {
    pub hidden: HashSet<TargetId>,
}

impl HiddenTargets {
    fn compute(&self) -> OverrideFrame {
        self.hidden
            .iter()
            .map(|target| (OverrideKey::Target(*target), OverrideOp::Hidden))
            .collect()
    }
}

/// The closed set of computed strategies.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ComputedSource {
    RegionMask(RegionMask),
    HiddenTargets(HiddenTargets),
}

impl ComputedSource {
    /// Derive this tick's frame for one viewer.
    pub(crate) fn compute(&mut self, viewer: ViewerId, world: &dyn WorldView) -> OverrideFrame {
        match self {
            Self::RegionMask(mask) => mask.compute(viewer, world),
            Self::HiddenTargets(targets) => targets.compute(),
        }
    }

    /// Whether overridden keys persist as a trail until stop.
    pub(crate) fn leaves_trail(&self) -> bool {
        match self {
            Self::RegionMask(mask) => mask.trail,
            Self::HiddenTargets(_) => false,
        }
    }
}
