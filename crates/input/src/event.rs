use glam::Vec2;

/// A raw input event in viewport space (pixels, origin top-left, y down).
///
/// The camera rig consumes these; the simulation never sees platform events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at a position. Starts an arcball drag.
    PointerDown(Vec2),
    /// Pointer moved while pressed.
    PointerMove(Vec2),
    /// Pan gesture: translation since the gesture began and the number of
    /// touches currently down (zero when the gesture ends).
    Pan { translation: Vec2, touches: u32 },
    /// Pinch gesture scale relative to the gesture start (1.0 = no change).
    Pinch(f32),
    /// Single tap. Stops any continuous rotation.
    Tap,
    /// Viewport resized.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// Whether this event carries a pointer position.
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::PointerDown(_) | Self::PointerMove(_))
    }
}
