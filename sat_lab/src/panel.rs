//! Lab control sidebar
//!
//! Runtime knobs for the scene: gravitational constant, moon placement,
//! satellite readouts, and a controls reference.

use crate::scene::Scene;
use egui::{Color32, Context, RichText};

/// Draw the right-hand control panel for the current frame.
pub fn draw_lab_panel(ctx: &Context, scene: &mut Scene, paused: &mut bool, mode_label: &str) {
    egui::SidePanel::right("lab_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading(RichText::new("Satellite Lab").color(Color32::LIGHT_BLUE));
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.group(|ui| {
                    ui.label(RichText::new("Physics").strong());
                    ui.horizontal(|ui| {
                        ui.label("G");
                        ui.add(
                            egui::DragValue::new(&mut scene.gravity.g)
                                .speed(1e-5)
                                .range(0.0..=1.0),
                        );
                    });
                    ui.label(format!("Bodies: {}", scene.gravity.bodies.len()));
                    ui.checkbox(paused, "Paused");
                });

                ui.add_space(6.0);

                if let Some(moon) = scene.gravity.find_body_mut("Moon") {
                    ui.group(|ui| {
                        ui.label(RichText::new("Moon").strong());
                        ui.horizontal(|ui| {
                            ui.label("x");
                            ui.add(egui::DragValue::new(&mut moon.position.x).speed(0.05));
                            ui.label("y");
                            ui.add(egui::DragValue::new(&mut moon.position.y).speed(0.05));
                            ui.label("z");
                            ui.add(egui::DragValue::new(&mut moon.position.z).speed(0.05));
                        });
                    });
                    ui.add_space(6.0);
                }

                if let Some(sat) = scene.satellite {
                    ui.group(|ui| {
                        ui.label(RichText::new("Sat01").strong());
                        let pos = sat.position(&scene.gravity);
                        ui.label(format!("pos: ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z));
                        ui.label(format!("speed: {:.2}", sat.speed(&scene.gravity)));
                    });
                    ui.add_space(6.0);
                }

                ui.group(|ui| {
                    ui.label(RichText::new("Camera").strong());
                    ui.label(format!("mode: {mode_label}"));
                });

                ui.add_space(6.0);

                ui.collapsing(RichText::new("Controls").strong(), |ui| {
                    ui.label("F: toggle mouse look");
                    ui.label("WASD + E/Q: fly camera");
                    ui.label("Tab: cycle camera mode");
                    ui.label("Arrows: satellite attitude");
                    ui.label("Shift: satellite thrust");
                    ui.label("1/2: presets, P: pause");
                });
            });
        });
}
