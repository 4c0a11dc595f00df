//! Per-viewer entity-visibility masks.

use hashbrown::HashSet;
use stagecraft_api_core::{TargetId, ViewerId};

use crate::computed::{ComputedSource, HiddenTargets};
use crate::error::PresentationError;
use crate::instance::{Cadence, FrameSource, PresentationInstance};
use crate::key::InstanceKey;
use crate::registry::Registry;
use crate::sink::PresentationSink;

/// Builder for hiding entities from one viewer. Keyed by the viewer's own
/// identity; re-registering unions the new targets into the live mask.
/// The stop event is vetoable for this kind.
#[derive(Clone, Debug)]
pub struct VisibilityMask {
    viewer: ViewerId,
    hidden: Vec<TargetId>,
    start_playing: bool,
}

impl VisibilityMask {
    pub fn for_viewer(viewer: ViewerId) -> Self {
        Self {
            viewer,
            hidden: Vec::new(),
            start_playing: false,
        }
    }

    pub fn hide(mut self, target: TargetId) -> Self {
        self.hidden.push(target);
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
        let hidden: HashSet<TargetId> = self.hidden.into_iter().collect();
        let merged = hidden.clone();

        let key = InstanceKey::Viewer(self.viewer);
        let instance = registry.register_with(
            key.clone(),
            || {
                let mut instance = PresentationInstance::new(
                    key,
                    Cadence::Fast,
                    FrameSource::Computed(ComputedSource::HiddenTargets(HiddenTargets { hidden })),
                );
                instance.stop_cancellable = true;
                instance
            },
            |existing| {
                if let Some(ComputedSource::HiddenTargets(targets)) = existing.computed_mut() {
                    targets.hidden.extend(merged);
                }
            },
        );

        super::finish(instance, vec![self.viewer], self.start_playing, sink)?;
        Ok(instance)
    }
}
