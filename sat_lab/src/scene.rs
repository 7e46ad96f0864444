//! Scene setup for the satellite lab
//!
//! Two presets: the planetary lab (sun, earth, moon, mars plus the
//! controllable satellite) and a debris ring. Presets validate their
//! geometry before handing the set to the simulation.

use crate::physics::{Body, GravitySet, SceneError, DEFAULT_G};
use crate::satellite::Satellite;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// A point light consumed by the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Everything the frame loop simulates and renders
pub struct Scene {
    pub gravity: GravitySet,
    pub lights: Vec<Light>,
    pub satellite: Option<Satellite>,
}

impl Scene {
    /// The default lab: earth/moon pair, mars, a far sun, and the satellite.
    pub fn planetary_lab() -> Result<Self, SceneError> {
        let mut gravity = GravitySet::new(DEFAULT_G);

        let tilt = Quat::from_rotation_y(110.0f32.to_radians());

        let earth_pos = Vec3::new(-2.5, 0.0, 0.4);
        let earth_mass = 4000.0;
        gravity.bodies.push(
            Body::new(earth_pos, Vec3::ZERO, earth_mass)
                .with_name("Earth")
                .with_color([0.2, 0.4, 0.8, 1.0])
                .with_radius(1.0)
                .with_orientation(tilt),
        );

        // Moon on a circular orbit around earth: v = sqrt(G*M/r)
        let moon_offset = Vec3::new(-2.5, 0.0, 0.0);
        let moon_speed = (gravity.g * earth_mass / moon_offset.length()).sqrt();
        gravity.bodies.push(
            Body::new(earth_pos + moon_offset, Vec3::new(0.0, 0.0, moon_speed), 60.0)
                .with_name("Moon")
                .with_color([0.7, 0.7, 0.7, 1.0])
                .with_radius(0.3)
                .with_orientation(tilt),
        );

        gravity.bodies.push(
            Body::new(Vec3::new(4.0, 0.0, -3.0), Vec3::new(0.0, 0.0, -0.4), 2000.0)
                .with_name("Mars")
                .with_color([0.8, 0.3, 0.2, 1.0])
                .with_radius(0.7),
        );

        // The sun sits far out; mostly a light source with a gentle pull
        gravity.bodies.push(
            Body::new(Vec3::new(10.0, 8.0, -6.0), Vec3::ZERO, 5.0e4)
                .with_name("Sun")
                .with_color([1.0, 0.9, 0.6, 1.0])
                .with_radius(1.8),
        );

        let sat_index = gravity.bodies.len();
        gravity.bodies.push(
            Body::new(Vec3::new(-2.0, 0.5, 1.8), Vec3::new(0.6, 0.0, 0.0), 1.0)
                .with_name("Sat01")
                .with_color([0.2, 0.9, 0.3, 1.0])
                .with_radius(0.08),
        );

        gravity.validate()?;

        let lights = vec![
            Light {
                position: Vec3::new(1.0, 8.0, 4.0),
                color: [1.0, 0.8, 1.0],
                intensity: 100.0,
            },
            Light {
                position: Vec3::new(10.0, 8.0, -6.0),
                color: [1.0, 0.95, 0.8],
                intensity: 400.0,
            },
        ];

        log::info!("planetary lab: {} bodies", gravity.bodies.len());

        Ok(Self {
            gravity,
            lights,
            satellite: Some(Satellite::new(sat_index)),
        })
    }

    /// A ring of light debris around one heavy central body.
    pub fn debris_ring(count: usize) -> Result<Self, SceneError> {
        let mut gravity = GravitySet::new(DEFAULT_G);

        let center_mass = 5.0e4;
        gravity.bodies.push(
            Body::new(Vec3::ZERO, Vec3::ZERO, center_mass)
                .with_name("Core")
                .with_color([1.0, 1.0, 0.9, 1.0])
                .with_radius(1.2),
        );

        let mut rng = rand::thread_rng();
        for i in 0..count {
            let distance = 3.0 + rng.gen::<f32>() * 8.0;
            let angle: f32 = rng.gen::<f32>() * TAU;
            let height = (rng.gen::<f32>() - 0.5) * 0.6;

            let position = Vec3::new(angle.cos() * distance, height, angle.sin() * distance);
            let orbital_speed = (gravity.g * center_mass / distance).sqrt();
            let velocity = Vec3::new(
                -angle.sin() * orbital_speed,
                0.0,
                angle.cos() * orbital_speed,
            );

            gravity.bodies.push(
                Body::new(position, velocity, 1.0 + rng.gen::<f32>() * 4.0)
                    .with_name(&format!("Debris{i:03}"))
                    .with_radius(0.12),
            );
        }

        gravity.validate()?;

        let lights = vec![Light {
            position: Vec3::new(0.0, 10.0, 0.0),
            color: [1.0, 0.9, 0.8],
            intensity: 300.0,
        }];

        log::info!("debris ring: {} bodies", gravity.bodies.len());

        Ok(Self {
            gravity,
            lights,
            satellite: None,
        })
    }

    /// One fixed physics step.
    pub fn fixed_step(&mut self, dt: f32) {
        self.gravity.step(dt);
    }
}
