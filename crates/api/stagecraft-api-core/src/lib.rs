//! stagecraft-api-core: shared presentation data types (core, host-agnostic)

pub mod bar;
pub mod content;
pub mod geometry;
pub mod ids;
pub mod overrides;

pub use bar::{BarColor, BarFrame, BarStyle, PayloadError};
pub use content::{Content, ContentChange};
pub use geometry::{BlockPos, Orientation, Vec3};
pub use ids::{TargetId, ViewerId};
pub use overrides::{OverrideFrame, OverrideKey, OverrideOp};
