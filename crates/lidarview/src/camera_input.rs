//! Mouse gestures mapped onto camera motion.
//!
//! Left drag orbits, right drag pans and the wheel zooms. Gestures are
//! dropped while the UI owns the pointer, but the cursor position keeps
//! tracking so a drag that leaves a window does not jump on return.

use glam::Vec2;
use lidarview_render::Camera;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Degrees of orbit per pixel of drag.
pub const ORBIT_SENSITIVITY: f32 = 0.5;

/// Pixel scroll distance treated as one wheel line.
pub const PIXELS_PER_LINE: f32 = 50.0;

/// Tracks button and cursor state between events.
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    left_down: bool,
    right_down: bool,
    cursor: Option<Vec2>,
}

impl CameraInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a button transition. Releases always register; presses only
    /// when the UI is not using the pointer.
    pub fn button(&mut self, button: MouseButton, state: ElementState, ui_wants_pointer: bool) {
        let pressed = state == ElementState::Pressed;
        if pressed && ui_wants_pointer {
            return;
        }
        match button {
            MouseButton::Left => self.left_down = pressed,
            MouseButton::Right => self.right_down = pressed,
            _ => {}
        }
    }

    /// Moves the cursor and applies any drag to `camera`.
    ///
    /// Returns the drag delta in pixels, or `None` when nothing was applied.
    pub fn cursor_moved(
        &mut self,
        position: Vec2,
        camera: &mut Camera,
        ui_wants_pointer: bool,
    ) -> Option<Vec2> {
        let previous = self.cursor.replace(position)?;
        if ui_wants_pointer || !(self.left_down || self.right_down) {
            return None;
        }

        let delta = position - previous;
        if self.left_down {
            camera.orbit(delta.x * ORBIT_SENSITIVITY, -delta.y * ORBIT_SENSITIVITY);
        }
        if self.right_down {
            camera.pan(delta.x, delta.y);
        }
        Some(delta)
    }

    /// Applies a wheel event. Returns the zoom amount in lines.
    pub fn scroll(
        &mut self,
        delta: MouseScrollDelta,
        camera: &mut Camera,
        ui_wants_pointer: bool,
    ) -> Option<f32> {
        if ui_wants_pointer {
            return None;
        }
        let lines = scroll_lines(delta);
        if lines == 0.0 {
            return None;
        }
        camera.zoom(lines);
        Some(lines)
    }

    /// Forgets the cursor, e.g. when it leaves the window.
    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.left_down || self.right_down
    }
}

/// Converts a wheel delta to lines; positive scrolls up.
#[must_use]
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    }
}
