//! Input mapping: discrete events and held keys to per-frame intents
//!
//! The mapper speaks its own small event vocabulary so it stays independent
//! of the windowing backend; `main.rs` translates winit events into it.
//! Discrete events (capture toggle, mouse motion, quit) are processed per
//! event, while held keys are sampled once per frame.

use common::Camera;
use glam::Vec3;

/// Camera fly speed in world units per second
pub const MOVE_SPEED: f32 = 3.0;

/// Radians of look rotation per unit of raw mouse motion per sample
pub const MOUSE_SENSITIVITY: f32 = 0.3;

/// Raw motion deltas arrive at a device-driven rate independent of the
/// render cadence; assume a 60 Hz sampling period rather than scaling by
/// the frame delta.
pub const MOUSE_SAMPLE_INTERVAL: f32 = 1.0 / 60.0;

/// Discrete input events, already translated from the windowing backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The designated mouse-capture toggle key went down
    CaptureToggle,
    /// Relative mouse motion in device units
    MouseMotion { dx: f32, dy: f32 },
    /// Window close request
    Quit,
}

/// Snapshot of the keys currently held, sampled once per frame
#[derive(Debug, Default, Clone, Copy)]
pub struct HeldKeys {
    // Camera translation, six signed directions
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
    // Satellite attitude and thrust
    pub sat_pitch_up: bool,
    pub sat_pitch_down: bool,
    pub sat_yaw_left: bool,
    pub sat_yaw_right: bool,
    pub sat_thrust: bool,
}

/// What one frame of input asks the rest of the core to do
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameIntents {
    /// Camera-local translation, already scaled by speed and frame time
    pub camera_translation: Vec3,
    /// Satellite thrust command as unit local axes
    pub sat_thrust: Vec3,
    /// Satellite torque command as unit local axes
    pub sat_torque: Vec3,
    pub quit: bool,
    /// `Some(state)` when the capture mode flipped this frame; the host
    /// must grab or release the cursor accordingly
    pub capture_change: Option<bool>,
}

/// Translates raw input into camera look deltas and frame intents
#[derive(Debug, Default)]
pub struct InputMapper {
    pub mouse_captured: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame of input mapping. Mouse motion feeds the camera's
    /// look accumulators directly (clamped there); everything else is
    /// returned as intents for the caller to route.
    pub fn process(
        &mut self,
        events: &[InputEvent],
        held: &HeldKeys,
        frame_dt: f32,
        camera: &mut Camera,
    ) -> FrameIntents {
        let mut intents = FrameIntents::default();

        for event in events {
            match *event {
                InputEvent::CaptureToggle => {
                    self.mouse_captured = !self.mouse_captured;
                    intents.capture_change = Some(self.mouse_captured);
                }
                InputEvent::MouseMotion { dx, dy } => {
                    if self.mouse_captured {
                        camera.add_look_delta(
                            -dx * MOUSE_SENSITIVITY * MOUSE_SAMPLE_INTERVAL,
                            -dy * MOUSE_SENSITIVITY * MOUSE_SAMPLE_INTERVAL,
                        );
                    }
                }
                InputEvent::Quit => intents.quit = true,
            }
        }

        // Continuous-response keys
        let step = MOVE_SPEED * frame_dt;
        if held.forward {
            intents.camera_translation.z -= step;
        }
        if held.backward {
            intents.camera_translation.z += step;
        }
        if held.left {
            intents.camera_translation.x -= step;
        }
        if held.right {
            intents.camera_translation.x += step;
        }
        if held.ascend {
            intents.camera_translation.y += step;
        }
        if held.descend {
            intents.camera_translation.y -= step;
        }

        if held.sat_pitch_up {
            intents.sat_torque.x += 1.0;
        }
        if held.sat_pitch_down {
            intents.sat_torque.x -= 1.0;
        }
        if held.sat_yaw_left {
            intents.sat_torque.y += 1.0;
        }
        if held.sat_yaw_right {
            intents.sat_torque.y -= 1.0;
        }
        if held.sat_thrust {
            // Thrust along the satellite's own forward axis
            intents.sat_thrust.z -= 1.0;
        }

        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::PITCH_LIMIT;

    fn camera() -> Camera {
        Camera::new(1.0)
    }

    #[test]
    fn capture_toggle_flips_and_reports() {
        let mut mapper = InputMapper::new();
        let mut cam = camera();

        let intents = mapper.process(&[InputEvent::CaptureToggle], &HeldKeys::default(), 0.016, &mut cam);
        assert!(mapper.mouse_captured);
        assert_eq!(intents.capture_change, Some(true));

        let intents = mapper.process(&[InputEvent::CaptureToggle], &HeldKeys::default(), 0.016, &mut cam);
        assert!(!mapper.mouse_captured);
        assert_eq!(intents.capture_change, Some(false));
    }

    #[test]
    fn motion_is_ignored_while_uncaptured() {
        let mut mapper = InputMapper::new();
        let mut cam = camera();

        let _ = mapper.process(
            &[InputEvent::MouseMotion { dx: 40.0, dy: -25.0 }],
            &HeldKeys::default(),
            0.016,
            &mut cam,
        );
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn motion_scales_by_sensitivity_and_sample_interval() {
        let mut mapper = InputMapper::new();
        mapper.mouse_captured = true;
        let mut cam = camera();

        let _ = mapper.process(
            &[InputEvent::MouseMotion { dx: 10.0, dy: 4.0 }],
            &HeldKeys::default(),
            0.016,
            &mut cam,
        );
        let expected = 10.0 * MOUSE_SENSITIVITY * MOUSE_SAMPLE_INTERVAL;
        assert!((cam.yaw + expected).abs() < 1e-6);
        let expected = 4.0 * MOUSE_SENSITIVITY * MOUSE_SAMPLE_INTERVAL;
        assert!((cam.pitch + expected).abs() < 1e-6);
    }

    #[test]
    fn pitch_clamps_across_many_motion_events() {
        let mut mapper = InputMapper::new();
        mapper.mouse_captured = true;
        let mut cam = camera();

        let events = vec![InputEvent::MouseMotion { dx: 0.0, dy: -10_000.0 }; 50];
        let _ = mapper.process(&events, &HeldKeys::default(), 0.016, &mut cam);
        assert_eq!(cam.pitch, PITCH_LIMIT);
    }

    #[test]
    fn held_forward_builds_local_translation() {
        let mut mapper = InputMapper::new();
        let mut cam = camera();
        let held = HeldKeys {
            forward: true,
            ..Default::default()
        };

        let dt = 0.5;
        let intents = mapper.process(&[], &held, dt, &mut cam);
        assert_eq!(intents.camera_translation, Vec3::new(0.0, 0.0, -MOVE_SPEED * dt));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut mapper = InputMapper::new();
        let mut cam = camera();
        let held = HeldKeys {
            left: true,
            right: true,
            ascend: true,
            ..Default::default()
        };

        let intents = mapper.process(&[], &held, 1.0, &mut cam);
        assert_eq!(intents.camera_translation, Vec3::new(0.0, MOVE_SPEED, 0.0));
    }

    #[test]
    fn satellite_keys_build_unit_axis_commands() {
        let mut mapper = InputMapper::new();
        let mut cam = camera();
        let held = HeldKeys {
            sat_pitch_up: true,
            sat_yaw_right: true,
            sat_thrust: true,
            ..Default::default()
        };

        let intents = mapper.process(&[], &held, 0.016, &mut cam);
        assert_eq!(intents.sat_torque, Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(intents.sat_thrust, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn quit_event_surfaces_as_flag() {
        let mut mapper = InputMapper::new();
        let mut cam = camera();
        let intents = mapper.process(&[InputEvent::Quit], &HeldKeys::default(), 0.016, &mut cam);
        assert!(intents.quit);
    }
}
