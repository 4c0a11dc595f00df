//! Per-viewer block illusions over a scanned region.

use hashbrown::HashSet;
use stagecraft_api_core::{Content, ViewerId};

use crate::computed::{ComputedSource, RegionMask};
use crate::error::PresentationError;
use crate::instance::{Cadence, FrameSource, PresentationInstance};
use crate::key::InstanceKey;
use crate::registry::Registry;
use crate::sink::PresentationSink;

/// Builder for a block mask around one viewer. Keyed by the viewer's own
/// identity; re-registering unions the new exception rules into the live
/// mask. The stop event is vetoable for this kind.
#[derive(Clone, Debug)]
pub struct BlockMask {
    viewer: ViewerId,
    mask: Content,
    matches: Vec<Content>,
    exceptions: Vec<Content>,
    extents: u32,
    min_distance: u32,
    trail: bool,
    start_playing: bool,
}

impl BlockMask {
    /// Mask blocks around `viewer` as `mask`. Scans a cube of half-extent
    /// 5 with a hole of radius 2 unless overridden.
    pub fn for_viewer(viewer: ViewerId, mask: Content) -> Self {
        Self {
            viewer,
            mask,
            matches: Vec::new(),
            exceptions: Vec::new(),
            extents: 5,
            min_distance: 2,
            trail: false,
            start_playing: false,
        }
    }

    /// Restrict masking to this real content (repeatable; empty means
    /// everything is masked).
    pub fn matching(mut self, content: Content) -> Self {
        self.matches.push(content);
        self
    }

    /// Exception rule: never mask this real content.
    pub fn except(mut self, content: Content) -> Self {
        self.exceptions.push(content);
        self
    }

    pub fn extents(mut self, extents: u32) -> Self {
        self.extents = extents;
        self
    }

    pub fn min_distance(mut self, min_distance: u32) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Positions once masked stay masked until stop.
    pub fn with_trail(mut self) -> Self {
        self.trail = true;
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
        if self.extents == 0 || self.min_distance > self.extents {
            return Err(PresentationError::InvalidRegion {
                extents: self.extents,
                min_distance: self.min_distance,
            });
        }

        let strategy = RegionMask {
            mask: self.mask,
            matches: self.matches.into_iter().collect(),
            exceptions: self.exceptions.iter().cloned().collect(),
            extents: self.extents,
            min_distance: self.min_distance,
            trail: self.trail,
        };
        let merged_exceptions: HashSet<Content> = self.exceptions.into_iter().collect();

        let key = InstanceKey::Viewer(self.viewer);
        let instance = registry.register_with(
            key.clone(),
            || {
                let mut instance = PresentationInstance::new(
                    key,
                    Cadence::Fast,
                    FrameSource::Computed(ComputedSource::RegionMask(strategy)),
                );
                instance.stop_cancellable = true;
                instance
            },
            |existing| {
                if let Some(ComputedSource::RegionMask(mask)) = existing.computed_mut() {
                    mask.exceptions.extend(merged_exceptions);
                }
            },
        );

        super::finish(instance, vec![self.viewer], self.start_playing, sink)?;
        Ok(instance)
    }
}
