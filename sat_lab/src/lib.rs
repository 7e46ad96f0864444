//! Interactive satellite lab
//!
//! N-body gravitational sandbox with a flyable camera and a directly
//! controlled satellite. The physics core (gravity, camera, input mapping)
//! is plain library code; the winit/wgpu host lives in the binary.

pub mod input;
pub mod panel;
pub mod physics;
pub mod renderer;
pub mod satellite;
pub mod scene;
