//! Named persistent fake content.

use std::collections::HashMap;

use stagecraft_api_core::{BlockPos, Content, ContentChange, ViewerId};

use crate::error::PresentationError;
use crate::frame::{FramePayload, FrameSequence};
use crate::instance::{Cadence, FrameSource, PresentationInstance};
use crate::key::InstanceKey;
use crate::registry::Registry;
use crate::sink::PresentationSink;

/// Builder for a named set of fake blocks, re-applied on every slow
/// advance so late world reloads cannot wipe the illusion. Re-registering
/// a name unions the new positions into the existing set; a position
/// present in both takes the new content.
#[derive(Clone, Debug)]
pub struct FakeContent {
    name: String,
    content: Vec<(BlockPos, Content)>,
    viewers: Vec<ViewerId>,
    start_playing: bool,
}

impl FakeContent {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
            viewers: Vec::new(),
            start_playing: false,
        }
    }

    pub fn set_content(mut self, pos: BlockPos, content: Content) -> Self {
        self.content.push((pos, content));
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
        if self.content.is_empty() {
            return Err(PresentationError::EmptyFrames);
        }
        let changes: Vec<(BlockPos, ContentChange)> = self
            .content
            .iter()
            .map(|(pos, content)| (*pos, ContentChange::Override(content.clone())))
            .collect();
        let mut sequence = FrameSequence::new();
        sequence.push(FramePayload::ContentChanges(changes), 1)?;

        let merged = self.content;
        let key = InstanceKey::named(self.name);
        let instance = registry.register_with(
            key.clone(),
            || PresentationInstance::new(key, Cadence::Slow, FrameSource::Static(sequence)),
            |existing| merge_content(existing, &merged),
        );

        super::finish(instance, self.viewers, self.start_playing, sink)?;
        Ok(instance)
    }
}

fn merge_content(existing: &mut PresentationInstance, additions: &[(BlockPos, Content)]) {
    let FrameSource::Static(seq) = &existing.source else {
        return;
    };
    let Some(FramePayload::ContentChanges(current)) = seq.get(0) else {
        return;
    };
    let mut by_pos: HashMap<BlockPos, ContentChange> = current.iter().cloned().collect();
    for (pos, content) in additions {
        by_pos.insert(*pos, ContentChange::Override(content.clone()));
    }
    let mut merged: Vec<(BlockPos, ContentChange)> = by_pos.into_iter().collect();
    merged.sort_by_key(|(pos, _)| (pos.x, pos.y, pos.z));
    let mut sequence = FrameSequence::new();
    if sequence
        .push(FramePayload::ContentChanges(merged), 1)
        .is_ok()
    {
        existing.set_static_frames(sequence);
    }
}
