//! First-person camera with free-look, look-at, and orbit orientation modes
//!
//! The camera looks down its local -Z axis. Orientation is always rebuilt
//! from scratch for the active mode, never integrated incrementally from the
//! previous frame, so identical inputs give identical transforms.

use glam::{Mat3, Mat4, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Pitch accumulator bound; keeps the free-look view short of gimbal flip
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// Squared-length threshold below which a direction is treated as degenerate
const DEGENERATE_SQ: f32 = 1e-12;

/// 3D perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    // Free-look / orbit angle accumulators
    pub yaw: f32,
    pub pitch: f32,
    // Projection parameters
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            yaw: 0.0,
            pitch: 0.0,
            fov: 70.0f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Accumulate a look delta. Pitch is clamped immediately so the
    /// accumulator never leaves `[-PITCH_LIMIT, PITCH_LIMIT]`, no matter how
    /// many deltas arrive in a frame.
    pub fn add_look_delta(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Rebuild orientation from the yaw/pitch accumulators (free-look mode).
    pub fn apply_free_look(&mut self) {
        self.orientation = Self::free_look_orientation(self.yaw, self.pitch);
    }

    /// Orientation for a given yaw/pitch pair: yaw about the world up axis,
    /// then pitch about the resulting camera-right axis. A pure function of
    /// its arguments.
    pub fn free_look_orientation(yaw: f32, pitch: f32) -> Quat {
        Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
    }

    /// Point the camera at `target` (look-at mode). The basis construction
    /// is a pure rotation; position is untouched.
    pub fn look_at(&mut self, target: Vec3) {
        self.orientation = Self::look_at_orientation(self.position, target, Vec3::Y);
    }

    /// Right-handed orthonormal view basis toward `target`, returned as the
    /// camera's object-to-world rotation. Falls back to the identity when
    /// eye and target coincide or the view direction is parallel to
    /// `world_up`.
    pub fn look_at_orientation(eye: Vec3, target: Vec3, world_up: Vec3) -> Quat {
        let forward = target - eye;
        if forward.length_squared() < DEGENERATE_SQ {
            return Quat::IDENTITY;
        }
        let forward = forward.normalize();

        let right = forward.cross(world_up);
        if right.length_squared() < DEGENERATE_SQ {
            return Quat::IDENTITY;
        }
        let right = right.normalize();
        let up = right.cross(forward);

        // Camera axes in world space: +X right, +Y up, +Z back
        Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
    }

    /// Place the camera on a sphere of `radius` around `target` using the
    /// yaw/pitch accumulators, facing the target (orbit mode).
    pub fn orbit_around(&mut self, target: Vec3, radius: f32) {
        self.position = target
            + radius
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                );
        self.look_at(target);
    }

    /// Move by a camera-local translation: the request is rotated by the
    /// current orientation, so motion follows where the camera faces.
    pub fn translate_local(&mut self, local: Vec3) {
        self.position += self.orientation * local;
    }

    /// Get the view matrix (inverse of the camera's placement transform)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_near(a: Vec3, b: Vec3, tol: f32) {
        assert!(
            (a - b).length() < tol,
            "expected {b:?}, got {a:?} (tol {tol})"
        );
    }

    #[test]
    fn pitch_stays_clamped_under_repeated_deltas() {
        let mut cam = Camera::new(1.0);
        for _ in 0..1000 {
            cam.add_look_delta(0.0, 0.3);
        }
        assert_eq!(cam.pitch, PITCH_LIMIT);

        cam.add_look_delta(0.0, -10.0);
        assert_eq!(cam.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn single_overshooting_delta_saturates_exactly() {
        let mut cam = Camera::new(1.0);
        cam.add_look_delta(0.0, 2.0); // beyond +pi/2
        assert_eq!(cam.pitch, PITCH_LIMIT);
    }

    #[test]
    fn free_look_is_deterministic() {
        let a = Camera::free_look_orientation(1.234, -0.567);
        let b = Camera::free_look_orientation(1.234, -0.567);
        assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn identity_free_look_faces_negative_z() {
        let q = Camera::free_look_orientation(0.0, 0.0);
        assert_vec3_near(q * Vec3::NEG_Z, Vec3::NEG_Z, 1e-6);
    }

    #[test]
    fn forward_key_moves_along_facing_direction() {
        // Camera facing world -Z, held "forward" for dt at speed 3.0
        let dt = 0.25;
        let speed = 3.0;
        let mut cam = Camera::new(1.0);
        cam.apply_free_look();
        cam.translate_local(Vec3::new(0.0, 0.0, -speed * dt));
        assert_vec3_near(cam.position, Vec3::new(0.0, 0.0, -speed * dt), 1e-6);
    }

    #[test]
    fn translation_follows_yawed_orientation() {
        let mut cam = Camera::new(1.0);
        cam.add_look_delta(FRAC_PI_2, 0.0);
        cam.apply_free_look();
        cam.translate_local(Vec3::new(0.0, 0.0, -1.0));
        // Yawed 90 degrees left: forward is now world -X
        assert_vec3_near(cam.position, Vec3::NEG_X, 1e-6);
    }

    #[test]
    fn look_at_down_negative_z_is_identity() {
        let q = Camera::look_at_orientation(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert_vec3_near(q * Vec3::NEG_Z, Vec3::NEG_Z, 1e-6);
        assert_vec3_near(q * Vec3::X, Vec3::X, 1e-6);
        assert_vec3_near(q * Vec3::Y, Vec3::Y, 1e-6);
    }

    #[test]
    fn look_at_produces_orthonormal_rotation() {
        let eye = Vec3::new(3.0, 2.0, -7.0);
        let target = Vec3::new(-1.0, 0.5, 4.0);
        let q = Camera::look_at_orientation(eye, target, Vec3::Y);
        assert!((q.length() - 1.0).abs() < 1e-5);
        assert_vec3_near(q * Vec3::NEG_Z, (target - eye).normalize(), 1e-5);
    }

    #[test]
    fn look_at_carries_no_translation() {
        let mut cam = Camera::new(1.0);
        cam.look_at(Vec3::new(2.0, 1.0, -3.0));
        // Camera at the origin: the view matrix must be a pure rotation
        let view = cam.view_matrix();
        assert_vec3_near(view.w_axis.truncate(), Vec3::ZERO, 1e-6);
        assert_eq!(cam.position, Vec3::ZERO);
    }

    #[test]
    fn degenerate_look_at_falls_back_to_identity() {
        // Coincident eye and target
        let q = Camera::look_at_orientation(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(q, Quat::IDENTITY);
        // View direction parallel to the up reference
        let q = Camera::look_at_orientation(Vec3::ZERO, Vec3::new(0.0, 9.0, 0.0), Vec3::Y);
        assert_eq!(q, Quat::IDENTITY);
        assert!(!q.is_nan());
    }

    #[test]
    fn orbit_keeps_distance_and_faces_target() {
        let mut cam = Camera::new(1.0);
        cam.yaw = 0.8;
        cam.pitch = 0.4;
        let target = Vec3::new(1.0, 2.0, 3.0);
        cam.orbit_around(target, 10.0);
        assert!(((cam.position - target).length() - 10.0).abs() < 1e-4);
        assert_vec3_near(
            cam.orientation * Vec3::NEG_Z,
            (target - cam.position).normalize(),
            1e-5,
        );
    }
}
