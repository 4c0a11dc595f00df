//! Builder surfaces for the built-in presentation kinds.
//!
//! Each kind maps one source subsystem onto the shared instance type:
//! it picks the registry key shape, the cadence, the stop-event policy,
//! and the merge semantics applied when a key is re-registered.

mod action_text;
mod block_mask;
mod board;
mod boss_bar;
mod camera_path;
mod fake_content;
mod visibility;

pub use action_text::ActionText;
pub use block_mask::BlockMask;
pub use board::{SidebarBoard, MAX_BOARD_LINES};
pub use boss_bar::BossBar;
pub use camera_path::CameraPath;
pub use fake_content::FakeContent;
pub use visibility::VisibilityMask;

use stagecraft_api_core::ViewerId;

use crate::error::PresentationError;
use crate::instance::PresentationInstance;
use crate::sink::PresentationSink;

/// Apply a builder's initial viewers and playback flag to the live
/// (possibly merged-existing) instance. Viewers already subscribed from a
/// previous registration are left as-is.
fn finish(
    instance: &mut PresentationInstance,
    viewers: Vec<ViewerId>,
    start_playing: bool,
    sink: &mut dyn PresentationSink,
) -> Result<(), PresentationError> {
    for viewer in viewers {
        match instance.add_viewer(viewer, sink) {
            Ok(_) | Err(PresentationError::DuplicateViewer { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    if start_playing {
        instance.play()?;
    }
    Ok(())
}
