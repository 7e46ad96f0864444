//! Common host plumbing for the satellite lab demo
//!
//! This crate provides the graphics/window setup, the camera model, and the
//! fixed-step frame clock consumed by the demo crate.

pub mod camera;
pub mod graphics;
pub mod timing;

pub use camera::*;
pub use graphics::*;
pub use timing::*;
