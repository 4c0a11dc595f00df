//! Boss-bar frame styling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for display payloads.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PayloadError {
    #[error("bar progress {progress} outside [0, 1]")]
    InvalidProgress { progress: f32 },
    #[error("bar title must not be empty")]
    EmptyTitle,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BarColor {
    Pink,
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    White,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BarStyle {
    Solid,
    Segmented6,
    Segmented10,
    Segmented12,
    Segmented20,
}

/// One renderable boss-bar state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarFrame {
    pub color: BarColor,
    pub style: BarStyle,
    pub progress: f32,
    pub title: String,
}

impl BarFrame {
    /// Build a validated bar frame. Progress must be within [0, 1] and the
    /// title non-empty; violations fail fast instead of being coerced.
    pub fn new(
        color: BarColor,
        style: BarStyle,
        progress: f32,
        title: impl Into<String>,
    ) -> Result<Self, PayloadError> {
        if !(0.0..=1.0).contains(&progress) {
            return Err(PayloadError::InvalidProgress { progress });
        }
        let title = title.into();
        if title.is_empty() {
            return Err(PayloadError::EmptyTitle);
        }
        Ok(Self {
            color,
            style,
            progress,
            title,
        })
    }
}
