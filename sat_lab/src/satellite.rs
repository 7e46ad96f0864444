//! The directly controlled satellite
//!
//! The satellite is an ordinary body in the gravity set; this wrapper owns
//! the control constants and turns the input mapper's unit-axis commands
//! into the force/torque requests the gravity step consumes.

use crate::physics::GravitySet;
use glam::Vec3;

/// Thruster force per unit command axis
pub const THRUST_STRENGTH: f32 = 1.5;

/// Reaction-wheel torque per unit command axis
pub const TORQUE_STRENGTH: f32 = 0.4;

/// Handle to the controllable body inside a [`GravitySet`]
#[derive(Debug, Clone, Copy)]
pub struct Satellite {
    pub body_index: usize,
    pub thrust_strength: f32,
    pub torque_strength: f32,
}

impl Satellite {
    pub fn new(body_index: usize) -> Self {
        Self {
            body_index,
            thrust_strength: THRUST_STRENGTH,
            torque_strength: TORQUE_STRENGTH,
        }
    }

    /// Queue this step's thruster and attitude commands. `local_thrust` and
    /// `local_torque` are unit-axis sums in the satellite's own frame; the
    /// thrust is rotated into world space by the current orientation before
    /// joining the gravity step's additive-force input.
    pub fn apply_commands(&self, set: &mut GravitySet, local_thrust: Vec3, local_torque: Vec3) {
        let body = &mut set.bodies[self.body_index];
        let world_force = body.orientation * (local_thrust * self.thrust_strength);
        body.apply_force(world_force);
        body.apply_torque(local_torque * self.torque_strength);
    }

    pub fn position(&self, set: &GravitySet) -> Vec3 {
        set.bodies[self.body_index].position
    }

    pub fn speed(&self, set: &GravitySet) -> f32 {
        set.bodies[self.body_index].velocity.length()
    }
}
