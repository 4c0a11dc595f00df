//! Block/world content values and per-viewer content changes.

use serde::{Deserialize, Serialize};

/// A namespaced content identifier ("stone", "sea_lantern", ...).
/// Opaque to the engine; only equality matters here.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Content(pub String);

impl Content {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One per-viewer content mutation. `Restore` hands the position back to
/// the real world state; the host binding knows the underlying value, the
/// engine never reads it back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ContentChange {
    Override(Content),
    Restore,
}

impl ContentChange {
    pub fn is_restore(&self) -> bool {
        matches!(self, Self::Restore)
    }
}
