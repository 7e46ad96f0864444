//! N-body gravitational physics
//!
//! Direct O(n²) pairwise Newtonian attraction. The gravity step is a force
//! generator: it accumulates net force on every body and then integrates
//! motion only for bodies this crate owns. Bodies flagged as externally
//! integrated keep their accumulated force for the owning backend to drain.

use glam::{Quat, Vec3};
use std::error::Error;
use std::fmt;

/// Gravitational constant, scaled for the lab scene
pub const DEFAULT_G: f32 = 6.674e-4;

/// Pairs separated by less than this are degenerate and contribute no force
pub const MIN_SEPARATION: f32 = 1e-5;

/// Who integrates a body's motion from the forces accumulated on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// The gravity step integrates velocity and position itself
    SelfIntegrated,
    /// A physics backend owns velocity/position; forces are handed over
    External,
}

/// A rigid body participating in gravity
#[derive(Debug, Clone)]
pub struct Body {
    pub name: Option<String>,
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Quat,
    pub angular_velocity: Vec3,
    pub mass: f32,
    pub motion: Motion,
    pub radius: f32,
    pub color: [f32; 4],
    /// Accumulated world-space force for the current fixed step
    pub force: Vec3,
    /// Accumulated body-local torque for the current fixed step
    pub torque: Vec3,
}

impl Body {
    pub fn new(position: Vec3, velocity: Vec3, mass: f32) -> Self {
        // Display radius grows with the cube root of mass
        let radius = (mass / 500.0).powf(1.0 / 3.0) * 0.4;

        // Cool for light bodies, warm for heavy ones
        let t = (mass / 5000.0).clamp(0.0, 1.0);
        let color = [0.3 + 0.7 * t, 0.5, 0.9 - 0.6 * t, 1.0];

        Self {
            name: None,
            position,
            velocity,
            orientation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            mass,
            motion: Motion::SelfIntegrated,
            radius,
            color,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Add a world-space force for the current fixed step, on top of gravity
    pub fn apply_force(&mut self, world_force: Vec3) {
        self.force += world_force;
    }

    /// Add a body-local torque for the current fixed step
    pub fn apply_torque(&mut self, local_torque: Vec3) {
        self.torque += local_torque;
    }

    /// Drain the accumulated net force (for an external physics backend)
    pub fn take_force(&mut self) -> Vec3 {
        std::mem::take(&mut self.force)
    }

    /// Drain the accumulated local torque (for an external physics backend)
    pub fn take_torque(&mut self) -> Vec3 {
        std::mem::take(&mut self.torque)
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "<unnamed>".to_string())
    }
}

/// Scene-setup validation failures
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    NonPositiveMass { body: String, mass: f32 },
    CoincidentBodies { a: String, b: String },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass { body, mass } => {
                write!(f, "gravitating body '{body}' has non-positive mass {mass}")
            }
            Self::CoincidentBodies { a, b } => {
                write!(f, "bodies '{a}' and '{b}' occupy the same position")
            }
        }
    }
}

impl Error for SceneError {}

/// The set of gravitating bodies
pub struct GravitySet {
    pub bodies: Vec<Body>,
    pub g: f32,
}

impl GravitySet {
    pub fn new(g: f32) -> Self {
        Self {
            bodies: Vec::new(),
            g,
        }
    }

    /// Check setup-time invariants: every body has positive mass and no two
    /// bodies coincide. Bad geometry is rejected here, once, instead of
    /// turning into NaN mid-simulation.
    pub fn validate(&self) -> Result<(), SceneError> {
        for body in &self.bodies {
            if body.mass <= 0.0 {
                return Err(SceneError::NonPositiveMass {
                    body: body.display_name(),
                    mass: body.mass,
                });
            }
        }
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let sep = self.bodies[j].position - self.bodies[i].position;
                if sep.length_squared() < MIN_SEPARATION * MIN_SEPARATION {
                    return Err(SceneError::CoincidentBodies {
                        a: self.bodies[i].display_name(),
                        b: self.bodies[j].display_name(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Net gravitational force on every body from every other body.
    /// Pure in the set's current positions and masses; each pair is
    /// evaluated once and applied to both sides with opposite sign.
    pub fn gravity_forces(&self) -> Vec<Vec3> {
        let n = self.bodies.len();
        let mut forces = vec![Vec3::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let separation = self.bodies[j].position - self.bodies[i].position;
                let dist_sq = separation.length_squared();

                if dist_sq < MIN_SEPARATION * MIN_SEPARATION {
                    log::warn!(
                        "skipping degenerate gravity pair {} / {}",
                        self.bodies[i].display_name(),
                        self.bodies[j].display_name()
                    );
                    continue;
                }

                let dist = dist_sq.sqrt();
                let magnitude = self.g * self.bodies[i].mass * self.bodies[j].mass / dist_sq;
                let force = separation / dist * magnitude;

                forces[i] += force;
                forces[j] -= force;
            }
        }

        forces
    }

    /// Advance one fixed step: fold gravity into each body's force
    /// accumulator, then integrate the bodies this crate owns. Thruster
    /// forces applied before this call ride along additively.
    pub fn step(&mut self, dt: f32) {
        let gravity = self.gravity_forces();

        for (body, g_force) in self.bodies.iter_mut().zip(gravity) {
            body.force += g_force;

            match body.motion {
                Motion::SelfIntegrated => {
                    body.velocity += body.force / body.mass * dt;
                    body.position += body.velocity * dt;

                    // Point-mass inertia: scalar, proportional to mass
                    let world_torque = body.orientation * body.torque;
                    body.angular_velocity += world_torque / body.mass * dt;
                    if body.angular_velocity.length_squared() > 0.0 {
                        body.orientation = (Quat::from_scaled_axis(body.angular_velocity * dt)
                            * body.orientation)
                            .normalize();
                    }

                    body.force = Vec3::ZERO;
                    body.torque = Vec3::ZERO;
                }
                // Accumulators stay filled for the backend to drain
                Motion::External => {}
            }
        }
    }

    pub fn find_body(&self, name: &str) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|b| b.name.as_deref() == Some(name))
    }

    pub fn find_body_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.bodies
            .iter_mut()
            .find(|b| b.name.as_deref() == Some(name))
    }
}
