//! Orbit camera and per-frame view/projection transforms.

use glam::{Mat4, Vec2, Vec3, Vec4};
use lidarview_core::BoundingBox;

/// Closest allowed distance from the target.
pub const MIN_DISTANCE: f32 = 0.1;
/// Farthest allowed distance from the target.
pub const MAX_DISTANCE: f32 = 1000.0;
/// Pitch limit in degrees; stays short of 90 so the look-at up vector never degenerates.
pub const PITCH_LIMIT: f32 = 89.0;
/// Near clipping plane.
pub const NEAR_PLANE: f32 = 0.1;
/// Far clipping plane.
pub const FAR_PLANE: f32 = 10_000.0;

const DEFAULT_DISTANCE: f32 = 10.0;
const DEFAULT_YAW: f32 = 45.0;
const DEFAULT_PITCH: f32 = 30.0;
const DEFAULT_FOV: f32 = 45.0;

/// Pan speed per pixel, relative to the camera distance.
const PAN_SCALE: f32 = 0.001;
/// Fraction of the distance covered by one unit of zoom.
const ZOOM_STEP: f32 = 0.1;

/// CAD-style fixed view directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    /// Looking straight down.
    Top,
    /// Looking along -Z.
    Front,
    /// Looking along -X.
    Side,
    /// Classic isometric angle.
    Isometric,
}

impl ViewPreset {
    /// All presets in UI order.
    pub const ALL: [ViewPreset; 4] = [
        ViewPreset::Top,
        ViewPreset::Front,
        ViewPreset::Side,
        ViewPreset::Isometric,
    ];

    /// Returns `(yaw, pitch)` in degrees.
    #[must_use]
    pub fn angles(self) -> (f32, f32) {
        match self {
            ViewPreset::Top => (0.0, 89.0),
            ViewPreset::Front => (0.0, 0.0),
            ViewPreset::Side => (90.0, 0.0),
            ViewPreset::Isometric => (45.0, 35.26),
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Top => "Top",
            ViewPreset::Front => "Front",
            ViewPreset::Side => "Side",
            ViewPreset::Isometric => "Isometric",
        }
    }
}

/// Pixel rectangle the frame is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport size as floats.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The view/projection pair of one frame.
///
/// Computed once per frame and shared by rasterization and label projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    /// World to eye space.
    pub view: Mat4,
    /// Eye to clip space, depth mapped to `[0, 1]`.
    pub projection: Mat4,
    /// Target pixel rectangle.
    pub viewport: Viewport,
}

impl FrameTransform {
    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Maps a world position to window coordinates.
    ///
    /// Returns `(x, y, depth)` with a top-left origin, or `None` when the
    /// point is behind the eye or its depth is outside `[0, 1]`.
    #[must_use]
    pub fn window_coords(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let vp = self.viewport;
        let x = vp.x as f32 + (ndc.x + 1.0) * 0.5 * vp.width as f32;
        let y = vp.y as f32 + (1.0 - ndc.y) * 0.5 * vp.height as f32;
        Some(Vec3::new(x, y, ndc.z))
    }

    /// Maps a world position to screen pixels (top-left origin).
    #[must_use]
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        self.window_coords(world).map(|w| w.truncate())
    }
}

/// Orbit camera in spherical coordinates around a look-at target.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Distance from the target.
    pub distance: f32,
    /// Rotation around the Y axis, degrees.
    pub yaw: f32,
    /// Elevation above the XZ plane, degrees.
    pub pitch: f32,
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Vertical field of view, degrees.
    pub fov: f32,
}

impl Camera {
    /// Creates a camera in the default pose.
    #[must_use]
    pub fn new() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            target: Vec3::ZERO,
            fov: DEFAULT_FOV,
        }
    }

    /// Restores the default pose.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Rotates around the target. Pitch is clamped, yaw wraps freely.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Slides the target for a screen drag of `(delta_x, delta_y)` pixels.
    ///
    /// The right vector comes from yaw alone and the vertical drag also moves
    /// the target along it, which gives a "drag to slide" feel rather than an
    /// exact unprojection. Speed scales with distance.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let yaw = self.yaw.to_radians();
        let right_x = yaw.cos();
        let right_z = -yaw.sin();
        let scale = self.distance * PAN_SCALE;

        self.target.x += (right_x * delta_x - right_x * delta_y) * scale;
        self.target.y += delta_y * scale;
        self.target.z += (right_z * delta_x - right_z * delta_y) * scale;
    }

    /// Scales the distance; positive `delta` zooms in.
    pub fn zoom(&mut self, delta: f32) {
        self.distance =
            (self.distance * (1.0 - delta * ZOOM_STEP)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Applies a fixed view direction, keeping target and distance.
    pub fn set_view(&mut self, preset: ViewPreset) {
        let (yaw, pitch) = preset.angles();
        self.yaw = yaw;
        self.pitch = pitch;
        log::debug!("camera preset {}", preset.name());
    }

    /// Looks down -Y from just short of vertical.
    pub fn set_top_view(&mut self) {
        self.set_view(ViewPreset::Top);
    }

    /// Looks along -Z at the XY face.
    pub fn set_front_view(&mut self) {
        self.set_view(ViewPreset::Front);
    }

    /// Looks along -X at the YZ face.
    pub fn set_side_view(&mut self) {
        self.set_view(ViewPreset::Side);
    }

    /// Shorthand for [`ViewPreset::Isometric`].
    pub fn set_isometric_view(&mut self) {
        self.set_view(ViewPreset::Isometric);
    }

    /// Centers on `bounds` at twice its largest side.
    pub fn frame_bounds(&mut self, bounds: &BoundingBox) {
        self.target = bounds.center();
        self.distance = (bounds.max_extent() * 2.0).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Eye position derived from the spherical coordinates.
    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.target
            + self.distance
                * Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos())
    }

    /// Returns the view matrix (world up is +Y).
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Returns the perspective projection for `aspect_ratio` (width / height).
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    /// Builds the frame transform for a `width` x `height` viewport.
    #[must_use]
    pub fn compute_transforms(&self, width: u32, height: u32) -> FrameTransform {
        let aspect_ratio = width.max(1) as f32 / height.max(1) as f32;
        FrameTransform {
            view: self.view_matrix(),
            projection: self.projection_matrix(aspect_ratio),
            viewport: Viewport {
                x: 0,
                y: 0,
                width,
                height,
            },
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
