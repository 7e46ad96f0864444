//! Satellite Lab - interactive gravitational sandbox
//!
//! N-body gravity with a flyable camera and a controllable satellite:
//! - Fixed-step gravity integration decoupled from render frame rate
//! - Free-look / look-at / orbit camera modes
//! - Point-lit sphere rendering with an egui control sidebar
//!
//! Controls:
//! - F: toggle mouse-look capture
//! - Mouse (captured): look around
//! - W/A/S/D + E/Q: fly camera
//! - Tab: cycle camera mode (free-look, look-at satellite, orbit)
//! - Arrow keys: satellite attitude, Shift: satellite thrust
//! - Scroll: orbit radius
//! - 1/2: presets (planetary lab, debris ring)
//! - P: pause, R: reset view

use common::{Camera, FixedStepClock, GraphicsContext};
use glam::Vec3;
use sat_lab::input::{FrameIntents, HeldKeys, InputEvent, InputMapper};
use sat_lab::panel::draw_lab_panel;
use sat_lab::renderer::Renderer;
use sat_lab::scene::Scene;
use std::f32::consts::FRAC_PI_4;
use winit::{
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
    window::CursorGrabMode,
};

const MAX_BODIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CameraMode {
    FreeLook,
    LookAtSatellite,
    Orbit,
}

impl CameraMode {
    fn next(self) -> Self {
        match self {
            Self::FreeLook => Self::LookAtSatellite,
            Self::LookAtSatellite => Self::Orbit,
            Self::Orbit => Self::FreeLook,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FreeLook => "free-look",
            Self::LookAtSatellite => "look-at satellite",
            Self::Orbit => "orbit",
        }
    }
}

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    scene: Scene,
    camera: Camera,
    camera_mode: CameraMode,
    orbit_radius: f32,
    mapper: InputMapper,
    held: HeldKeys,
    pending_events: Vec<InputEvent>,
    clock: FixedStepClock,
    paused: bool,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, scene: Scene) -> Self {
        let renderer = Renderer::new(&ctx, MAX_BODIES);

        let mut camera = Camera::new(ctx.aspect_ratio());
        camera.position = Vec3::new(0.0, 7.0, 7.0);
        camera.pitch = -FRAC_PI_4;
        camera.apply_free_look();

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            scene,
            camera,
            camera_mode: CameraMode::FreeLook,
            orbit_radius: 10.0,
            mapper: InputMapper::new(),
            held: HeldKeys::default(),
            pending_events: Vec::new(),
            clock: FixedStepClock::default(),
            paused: false,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
    }

    fn set_scene(&mut self, scene: Result<Scene, sat_lab::physics::SceneError>) {
        match scene {
            Ok(scene) => self.scene = scene,
            Err(e) => log::error!("preset rejected: {e}"),
        }
    }

    fn apply_capture(&self, captured: bool) {
        let grab = if captured {
            self.ctx
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.ctx.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.ctx.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            log::warn!("cursor grab change failed: {e}");
        }
        self.ctx.window.set_cursor_visible(!captured);
    }

    /// Run one frame: map input, drain fixed physics steps, update the
    /// camera for its mode. Returns the frame's intents (for quit).
    fn update(&mut self, dt: f32) -> FrameIntents {
        let events = std::mem::take(&mut self.pending_events);
        let intents = self.mapper.process(&events, &self.held, dt, &mut self.camera);

        if let Some(captured) = intents.capture_change {
            self.apply_capture(captured);
        }

        if !self.paused {
            self.clock.advance(dt);
            while self.clock.tick() {
                if let Some(sat) = self.scene.satellite {
                    sat.apply_commands(&mut self.scene.gravity, intents.sat_thrust, intents.sat_torque);
                }
                self.scene.fixed_step(self.clock.step());
            }
        }

        let sat_target = self
            .scene
            .satellite
            .map(|s| s.position(&self.scene.gravity))
            .unwrap_or(Vec3::ZERO);

        match self.camera_mode {
            CameraMode::FreeLook => {
                self.camera.apply_free_look();
                self.camera.translate_local(intents.camera_translation);
            }
            CameraMode::LookAtSatellite => {
                self.camera.translate_local(intents.camera_translation);
                self.camera.look_at(sat_target);
            }
            CameraMode::Orbit => {
                self.camera.orbit_around(sat_target, self.orbit_radius);
            }
        }

        intents
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let num_instances = self.renderer.update_scene(&self.ctx.queue, &self.scene);

        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let mode_label = self.camera_mode.label();
        let scene = &mut self.scene;
        let paused = &mut self.paused;
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            draw_lab_panel(ctx, scene, paused, mode_label);
        });

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, &self.ctx.depth_view, num_instances);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        let pressed = state == ElementState::Pressed;

        // Continuous-response keys, tracked as held state
        match key {
            KeyCode::KeyW => self.held.forward = pressed,
            KeyCode::KeyS => self.held.backward = pressed,
            KeyCode::KeyA => self.held.left = pressed,
            KeyCode::KeyD => self.held.right = pressed,
            KeyCode::KeyE => self.held.ascend = pressed,
            KeyCode::KeyQ => self.held.descend = pressed,
            KeyCode::ArrowUp => self.held.sat_pitch_up = pressed,
            KeyCode::ArrowDown => self.held.sat_pitch_down = pressed,
            KeyCode::ArrowLeft => self.held.sat_yaw_left = pressed,
            KeyCode::ArrowRight => self.held.sat_yaw_right = pressed,
            KeyCode::ShiftLeft => self.held.sat_thrust = pressed,
            _ => {}
        }

        // Discrete keys fire on the initial press only
        if !pressed || repeat {
            return;
        }

        match key {
            KeyCode::KeyF => self.pending_events.push(InputEvent::CaptureToggle),
            KeyCode::Tab => self.camera_mode = self.camera_mode.next(),
            KeyCode::KeyP => self.paused = !self.paused,
            KeyCode::KeyR => {
                self.camera.position = Vec3::new(0.0, 7.0, 7.0);
                self.camera.yaw = 0.0;
                self.camera.pitch = -FRAC_PI_4;
                self.camera_mode = CameraMode::FreeLook;
            }
            KeyCode::Digit1 => self.set_scene(Scene::planetary_lab()),
            KeyCode::Digit2 => self.set_scene(Scene::debris_ring(250)),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.orbit_radius = (self.orbit_radius - delta).max(1.0);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui
            .state
            .on_window_event(&self.ctx.window, event)
            .consumed
    }
}

fn main() {
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new("Satellite Lab", 1280, 720));

    let scene = Scene::planetary_lab().expect("default scene must validate");
    let mut app = App::new(ctx, scene);
    let mut last_time = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    if !consumed {
                        match event {
                            WindowEvent::CloseRequested => {
                                app.pending_events.push(InputEvent::Quit);
                            }
                            WindowEvent::Resized(size) => app.resize(*size),
                            WindowEvent::KeyboardInput {
                                event:
                                    KeyEvent {
                                        physical_key: PhysicalKey::Code(key),
                                        state,
                                        repeat,
                                        ..
                                    },
                                ..
                            } => app.handle_key(*key, *state, *repeat),
                            WindowEvent::MouseWheel { delta, .. } => {
                                let scroll = match delta {
                                    MouseScrollDelta::LineDelta(_, y) => *y,
                                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                                };
                                app.handle_scroll(scroll);
                            }
                            WindowEvent::RedrawRequested => {
                                let now = std::time::Instant::now();
                                let dt = (now - last_time).as_secs_f32().min(0.1);
                                last_time = now;

                                let intents = app.update(dt);
                                if intents.quit {
                                    elwt.exit();
                                    return;
                                }

                                match app.render() {
                                    Ok(_) => {}
                                    Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                    Err(e) => log::error!("render error: {e:?}"),
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => {
                    app.pending_events.push(InputEvent::MouseMotion {
                        dx: delta.0 as f32,
                        dy: delta.1 as f32,
                    });
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
