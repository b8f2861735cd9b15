use glam::Vec2;

use crate::action::CameraAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Tracks cursor position and the held button, and turns motion into actions.
///
/// Primary drag rotates, secondary drag pans, middle drag zooms by the sign
/// of the vertical motion. Wheel input always zooms.
#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor: Option<Vec2>,
    held: Option<PointerButton>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: PointerButton) {
        if self.held.is_none() {
            self.held = Some(button);
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.held == Some(button) {
            self.held = None;
        }
    }

    /// Cursor left the surface: end any drag and forget the position.
    pub fn leave(&mut self) {
        self.held = None;
        self.cursor = None;
    }

    /// Record a new cursor position, returning the action for the active drag.
    pub fn moved(&mut self, position: Vec2) -> Option<CameraAction> {
        let previous = self.cursor.replace(position)?;
        let delta = position - previous;
        let action = match self.held? {
            PointerButton::Primary => CameraAction::Rotate(delta),
            PointerButton::Secondary => CameraAction::Pan(delta),
            PointerButton::Middle if delta.y == 0.0 => return None,
            // Dragging up moves toward the target.
            PointerButton::Middle => CameraAction::Zoom(-delta.y.signum()),
        };
        (!action.is_noop()).then_some(action)
    }

    /// Wheel input in lines; positive scrolls away from the user.
    pub fn scrolled(&mut self, lines: f32) -> Option<CameraAction> {
        let action = CameraAction::Zoom(lines);
        (!action.is_noop()).then_some(action)
    }
}
