//! Cinematic camera paths.

use stagecraft_api_core::{Orientation, Vec3, ViewerId};

use crate::error::PresentationError;
use crate::frame::{FramePayload, FrameSequence};
use crate::instance::{Cadence, FrameSource, PresentationInstance};
use crate::key::InstanceKey;
use crate::registry::Registry;
use crate::sink::PresentationSink;

/// Builder for a camera path: a sequence of poses the viewer is carried
/// through, one per fast tick (`hold` repeats a pose). A viewer rides at
/// most one path; re-registering while one is live is a no-op on the
/// pose sequence.
#[derive(Clone, Debug)]
pub struct CameraPath {
    viewer: ViewerId,
    poses: Vec<(Vec3, Orientation, u32)>,
    start_playing: bool,
}

impl CameraPath {
    pub fn for_viewer(viewer: ViewerId) -> Self {
        Self {
            viewer,
            poses: Vec::new(),
            start_playing: false,
        }
    }

    /// Append a pose held for `hold` ticks.
    pub fn add_pose(mut self, position: Vec3, orientation: Orientation, hold: u32) -> Self {
        self.poses.push((position, orientation, hold));
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
        for (position, orientation, hold) in &self.poses {
            sequence.push(
                FramePayload::CameraPose {
                    position: *position,
                    orientation: *orientation,
                },
                *hold,
            )?;
        }
        if sequence.is_empty() {
            return Err(PresentationError::EmptyFrames);
        }

        let key = InstanceKey::Viewer(self.viewer);
        let instance = registry.register_with(
            key.clone(),
            || PresentationInstance::new(key, Cadence::Fast, FrameSource::Static(sequence)),
            |_existing| {},
        );

        super::finish(instance, vec![self.viewer], self.start_playing, sink)?;
        Ok(instance)
    }
}
