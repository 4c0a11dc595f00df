//! stagecraft-presentation-core (host-agnostic)
//!
//! The consolidated per-viewer presentation engine: a registry of live
//! instances keyed by identity, each owning a static frame sequence or a
//! computed-frame strategy plus a viewer set and a pause/play/stop
//! lifecycle, all driven by a two-cadence tick dispatcher. Hosts plug in
//! at two seams: `PresentationSink` for every client-visible mutation and
//! `WorldView` for the read-only state computed frames consume.

pub mod computed;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod instance;
pub mod key;
pub mod kinds;
pub mod registry;
pub mod scan;
pub mod sink;
pub mod ticker;
pub mod viewers;
pub mod world;

// Re-exports for hosts and adapters
pub use computed::{ComputedSource, HiddenTargets, RegionMask};
pub use config::Config;
pub use error::PresentationError;
pub use events::{EventDecision, FrameNotice, LifecycleEvent};
pub use frame::{BoardLine, FramePayload, FrameSequence};
pub use instance::{Advance, Cadence, FrameSource, PlaybackState, PresentationInstance};
pub use key::InstanceKey;
pub use kinds::{
    ActionText, BlockMask, BossBar, CameraPath, FakeContent, SidebarBoard, VisibilityMask,
    MAX_BOARD_LINES,
};
pub use registry::Registry;
pub use scan::scan_region;
pub use sink::PresentationSink;
pub use ticker::{TickDispatcher, TickReport};
pub use viewers::ViewerSet;
pub use world::{EmptyWorld, WorldView};
pub use stagecraft_api_core::{
    BarColor, BarFrame, BarStyle, BlockPos, Content, ContentChange, Orientation, OverrideFrame,
    OverrideKey, OverrideOp, PayloadError, TargetId, Vec3, ViewerId,
};
