//! Editor input surface
//!
//! Keyboard and pointer wiring live outside the core; whatever layer owns
//! them translates raw events into these discrete commands and feeds them to
//! `Engine::apply_command`.

use crate::gizmo::GizmoMode;

/// A discrete editor action delivered by the external input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Put the gizmo into a specific manipulation mode
    SwitchGizmoMode(GizmoMode),
    /// Advance the gizmo to the next mode in its cycle
    CycleGizmoMode,
    /// Delete the selected object, subject to the last-object rule
    DeleteSelected,
    /// Drop the current selection
    ClearSelection,
    /// Point the camera at the selected object's live position
    FocusSelection,
}
