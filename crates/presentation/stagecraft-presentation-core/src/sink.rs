//! The host boundary: every client-visible mutation goes through here.
//!
//! The engine decides *what* each viewer should currently see; the sink is
//! the host-specific API that performs the actual send. Implementations
//! must be cheap to call once per viewer per tick.

use stagecraft_api_core::{BarFrame, BlockPos, ContentChange, Orientation, TargetId, Vec3, ViewerId};

pub trait PresentationSink {
    /// Short-lived text above the hotbar.
    fn send_ephemeral_text(&mut self, viewer: ViewerId, text: &str);

    /// Boss-bar state for this viewer.
    fn apply_bar_frame(&mut self, viewer: ViewerId, frame: &BarFrame);

    /// Per-viewer block illusion or its removal (`Restore` hands the
    /// position back to the real world state).
    fn send_content_change(&mut self, viewer: ViewerId, pos: BlockPos, change: &ContentChange);

    /// Show or hide a target entity for this viewer.
    fn set_visibility(&mut self, viewer: ViewerId, target: TargetId, visible: bool);

    /// Rewrite one sidebar line of the named board.
    fn update_board_line(&mut self, board: &str, viewer: ViewerId, line_index: u8, text: &str);

    /// Move the viewer's camera along a cinematic path.
    fn teleport_viewer(&mut self, viewer: ViewerId, position: Vec3, orientation: Orientation);

    /// Disconnected viewers are skipped for the current advance rather
    /// than aborting the cycle.
    fn is_reachable(&self, viewer: ViewerId) -> bool {
        let _ = viewer;
        true
    }
}
