//! Viewer subscription bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stagecraft_api_core::ViewerId;

/// The set of viewers currently subscribed to an instance.
/// Insertion order is irrelevant; duplicates are rejected at insert.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ViewerSet {
    viewers: HashSet<ViewerId>,
}

impl ViewerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            viewers: HashSet::with_capacity(capacity),
        }
    }

    /// Returns false when the viewer was already present.
    pub fn insert(&mut self, viewer: ViewerId) -> bool {
        self.viewers.insert(viewer)
    }

    pub fn remove(&mut self, viewer: &ViewerId) -> bool {
        self.viewers.remove(viewer)
    }

    pub fn contains(&self, viewer: &ViewerId) -> bool {
        self.viewers.contains(viewer)
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewerId> {
        self.viewers.iter()
    }

    /// Point-in-time copy; lifecycle loops iterate this so the live set
    /// can be mutated mid-loop.
    pub fn snapshot(&self) -> Vec<ViewerId> {
        self.viewers.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.viewers.clear();
    }
}
