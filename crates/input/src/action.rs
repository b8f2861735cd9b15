use glam::Vec2;

/// A camera manipulation produced from pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Orbit around the target by a pointer delta in pixels.
    Rotate(Vec2),
    /// Slide the target in screen space by a pointer delta in pixels.
    Pan(Vec2),
    /// Move toward (positive) or away from (negative) the target, in steps.
    Zoom(f32),
}

impl CameraAction {
    /// Actions with no effect are dropped instead of forwarded.
    pub fn is_noop(&self) -> bool {
        match self {
            CameraAction::Rotate(d) | CameraAction::Pan(d) => *d == Vec2::ZERO,
            CameraAction::Zoom(steps) => *steps == 0.0,
        }
    }
}
