use std::ops::Range;

use glam::*;

/// The camera trait.
///
/// This is what [`ScreenProjector`](crate::ScreenProjector) needs to map world positions to the
/// viewport, so the host engine may implement it on its own camera type.
pub trait CameraTrait {
    /// Get the position.
    fn pos(&self) -> Vec3;

    /// Get the normalized forward vector.
    fn forward(&self) -> Vec3;

    /// Get the view matrix.
    fn view(&self) -> Mat4;

    /// Get the projection matrix.
    fn projection(&self, aspect_ratio: f32) -> Mat4;
}

/// A camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The position of the camera.
    pub pos: Vec3,
    /// The z range of the camera.
    pub z: Range<f32>,
    /// The vertical FOV.
    pub vertical_fov: f32,
    /// The pitch.
    pub pitch: f32,
    /// The yaw.
    pub yaw: f32,
}

impl Camera {
    /// Up direction.
    pub const UP: Vec3 = Vec3::Y;

    /// The pitch limit.
    pub const PITCH_LIMIT: Range<f32> =
        -std::f32::consts::FRAC_PI_2 + 1e-6..std::f32::consts::FRAC_PI_2 - 1e-6;

    /// Create a new camera.
    pub fn new(z: Range<f32>, vertical_fov: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            z,
            vertical_fov,
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    /// Move the camera.
    pub fn move_by(&mut self, forward: f32, right: f32) {
        self.pos += self.get_forward() * forward + self.get_right() * right;
    }

    /// Apply pitch.
    pub fn pitch_by(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(Self::PITCH_LIMIT.start, Self::PITCH_LIMIT.end);
    }

    /// Apply yaw.
    pub fn yaw_by(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(2.0 * std::f32::consts::PI);
    }

    /// Point the camera at a world position.
    ///
    /// Pitch is clamped to [`Camera::PITCH_LIMIT`], so looking straight up or down is approximate.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.pos).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }

        self.pitch = dir
            .y
            .asin()
            .clamp(Self::PITCH_LIMIT.start, Self::PITCH_LIMIT.end);
        self.yaw = dir.x.atan2(dir.z).rem_euclid(2.0 * std::f32::consts::PI);
    }

    /// Get the forward vector.
    pub fn get_forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Get the right vector.
    pub fn get_right(&self) -> Vec3 {
        self.get_forward().cross(Self::UP).normalize()
    }
}

impl CameraTrait for Camera {
    fn pos(&self) -> Vec3 {
        self.pos
    }

    fn forward(&self) -> Vec3 {
        self.get_forward()
    }

    fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.pos, self.get_forward(), Self::UP)
    }

    fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.vertical_fov, aspect_ratio, self.z.start, self.z.end)
    }
}
