use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::Interval;

/// Movement below this magnitude is treated as "no movement".
pub const MOVEMENT_EPSILON: f32 = 1e-5;

/// Valid pitch range: straight down to straight up.
const PITCH_RANGE: Interval = Interval::new(-FRAC_PI_2, FRAC_PI_2);

/// First-person camera state owned by the host frame loop.
///
/// Angles are in radians; the field of view is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub fov_degrees: f32,
    pub position: Vec3,
}

impl CameraState {
    /// Create a camera state. Pitch is clamped to [-π/2, π/2].
    pub fn new(yaw: f32, pitch: f32, fov_degrees: f32, position: Vec3) -> Self {
        Self {
            yaw,
            pitch: PITCH_RANGE.clamp(pitch),
            fov_degrees,
            position,
        }
    }

    /// Ground-plane forward, used for walking. Ignores pitch.
    pub fn front(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(sin_yaw, 0.0, -cos_yaw)
    }

    /// Camera right vector. Lies in the ground plane.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-cos_yaw, 0.0, -sin_yaw)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(0.0, 0.0, 60.0, Vec3::ZERO)
    }
}

/// Orthonormal view basis derived from a [`CameraState`] once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// tan(fov / 2)
    pub fov_scale: f32,
}

/// Derive the view basis for the given camera.
///
/// `forward`, `right` and `up` are mutually orthogonal unit vectors for
/// every yaw and every pitch in [-π/2, π/2].
pub fn compute_view_basis(state: &CameraState) -> ViewBasis {
    let (sin_yaw, cos_yaw) = state.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = state.pitch.sin_cos();

    ViewBasis {
        forward: Vec3::new(cos_pitch * sin_yaw, sin_pitch, -cos_pitch * cos_yaw),
        right: state.right(),
        up: Vec3::new(-sin_pitch * sin_yaw, cos_pitch, sin_pitch * cos_yaw),
        fov_scale: (state.fov_degrees.to_radians() / 2.0).tan(),
    }
}

/// Per-frame movement request, each axis typically in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// Along the ground-plane front vector
    pub forward: f32,
    /// Along the right vector
    pub strafe: f32,
    /// Along world +Y
    pub vertical: f32,
}

impl MovementIntent {
    pub fn new(forward: f32, strafe: f32, vertical: f32) -> Self {
        Self {
            forward,
            strafe,
            vertical,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.vertical == 0.0
    }
}

/// Tuning for how input maps onto the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    /// Look sensitivity; 1.0 turns by one field of view per viewport dragged
    pub sensitivity: f32,
    /// Distance moved per frame while a movement key is held
    pub move_speed: f32,
    /// Degrees of FOV per scroll unit
    pub scroll_sensitivity: f32,
    /// Allowed field of view, in degrees
    pub fov_range: Interval,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            move_speed: 0.05,
            scroll_sensitivity: 2.0,
            fov_range: Interval::new(1.0, 150.0),
        }
    }
}

/// Applies input deltas to a [`CameraState`].
///
/// Every operation saturates: out-of-range results are clamped, never
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraController {
    pub settings: ControlSettings,
}

impl CameraController {
    pub fn new(settings: ControlSettings) -> Self {
        Self { settings }
    }

    /// Move the camera along the ground plane and world Y.
    ///
    /// The combined direction is normalized and scaled by the move speed, so
    /// diagonal movement is not faster. Intents that cancel out leave the
    /// position unchanged.
    pub fn integrate_movement(&self, state: &mut CameraState, intent: MovementIntent) {
        let dx = state.front() * intent.forward
            + state.right() * intent.strafe
            + Vec3::new(0.0, intent.vertical, 0.0);

        if dx.length() > MOVEMENT_EPSILON {
            state.position += dx.normalize() * self.settings.move_speed;
        }
    }

    /// Rotate the camera from a pointer delta in pixels.
    ///
    /// The angular scale follows the current FOV so zoomed-in views turn
    /// slower.
    pub fn look(
        &self,
        state: &mut CameraState,
        delta_x: f32,
        delta_y: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) {
        let scale = self.settings.sensitivity * state.fov_degrees / 180.0 * PI;

        if viewport_width > 0 {
            state.yaw -= delta_x * scale / viewport_width as f32;
        }
        if viewport_height > 0 {
            state.pitch -= delta_y * scale / viewport_height as f32;
        }
        state.pitch = PITCH_RANGE.clamp(state.pitch);
    }

    /// Additive zoom from a scroll delta. Positive widens the view.
    pub fn scroll_zoom(&self, state: &mut CameraState, delta: f32) {
        let fov = state.fov_degrees + delta * self.settings.scroll_sensitivity;
        state.fov_degrees = self.settings.fov_range.clamp(fov);
    }

    /// Multiplicative zoom from a two-finger pinch.
    ///
    /// Spreading the fingers (current > previous) narrows the view.
    pub fn pinch_zoom(&self, state: &mut CameraState, previous_distance: f32, current_distance: f32) {
        let valid = |d: f32| d.is_finite() && d > 0.0;
        if !valid(previous_distance) || !valid(current_distance) {
            return;
        }

        let fov = state.fov_degrees * (previous_distance / current_distance);
        state.fov_degrees = self.settings.fov_range.clamp(fov);
    }

    /// Bring an externally built state back into the configured bounds.
    pub fn clamp(&self, state: &mut CameraState) {
        state.pitch = PITCH_RANGE.clamp(state.pitch);
        state.fov_degrees = self.settings.fov_range.clamp(state.fov_degrees);
    }
}
