//! Error types for the presentation engine.

use serde::{Deserialize, Serialize};
use stagecraft_api_core::{PayloadError, ViewerId};

/// Failures raised by registry, lifecycle, and builder operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PresentationError {
    /// No live instance under this key
    #[error("presentation not found: {key}")]
    InstanceNotFound { key: String },

    /// Mutating call after stop()
    #[error("presentation {key} is stopped")]
    InstanceStopped { key: String },

    /// addViewer with an identity already subscribed
    #[error("viewer {viewer} already subscribed")]
    DuplicateViewer { viewer: ViewerId },

    /// removeViewer with an unknown identity
    #[error("viewer {viewer} not subscribed")]
    ViewerNotFound { viewer: ViewerId },

    /// Static builder finished with no frames
    #[error("frame sequence must not be empty")]
    EmptyFrames,

    /// addFrame with repeat count zero
    #[error("frame repeat count must be at least 1")]
    InvalidRepeat,

    /// updateFrame outside the sequence
    #[error("frame index {index} out of range (len {len})")]
    FrameIndexOutOfRange { index: usize, len: usize },

    /// Frame-at-index operation on a computed source
    #[error("presentation {key} computes its frames; it has no static sequence")]
    ComputedSource { key: String },

    /// Region mask with zero extent or a hole larger than the region
    #[error("invalid region: extents {extents}, min_distance {min_distance}")]
    InvalidRegion { extents: u32, min_distance: u32 },

    /// Sidebar line index past the board's last line
    #[error("board line {index} out of range (max {max})")]
    LineIndexOutOfRange { index: u8, max: u8 },

    /// Dispatcher or engine configuration rejected at construction
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Display payload validation failure
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl PresentationError {
    /// Coarse grouping for logging/metrics.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InstanceNotFound { .. } | Self::InstanceStopped { .. } => "registry",
            Self::DuplicateViewer { .. } | Self::ViewerNotFound { .. } => "viewer",
            Self::EmptyFrames
            | Self::InvalidRepeat
            | Self::FrameIndexOutOfRange { .. }
            | Self::ComputedSource { .. }
            | Self::InvalidRegion { .. }
            | Self::LineIndexOutOfRange { .. }
            | Self::InvalidConfig { .. } => "validation",
            Self::Payload(_) => "payload",
        }
    }
}
