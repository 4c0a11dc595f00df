//! Registry keys.

use serde::{Deserialize, Serialize};
use stagecraft_api_core::ViewerId;
use uuid::Uuid;

/// Identity of a live presentation instance within a registry.
///
/// Per-player singleton subsystems key by the viewer's own identity, named
/// subsystems by a caller-supplied string, and anonymous instances by a
/// token minted at creation time.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum InstanceKey {
    Viewer(ViewerId),
    Named(String),
    Token(Uuid),
}

impl InstanceKey {
    /// Mint a fresh anonymous key.
    pub fn mint() -> Self {
        Self::Token(Uuid::new_v4())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Board identifier used by sidebar payloads: the name for named
    /// instances, the rendered id otherwise.
    pub fn board_label(&self) -> String {
        match self {
            Self::Named(name) => name.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Viewer(v) => write!(f, "viewer:{v}"),
            Self::Named(n) => write!(f, "named:{n}"),
            Self::Token(t) => write!(f, "token:{t}"),
        }
    }
}

impl From<ViewerId> for InstanceKey {
    fn from(v: ViewerId) -> Self {
        Self::Viewer(v)
    }
}
