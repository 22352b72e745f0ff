use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use particle_repel::{
    Arena, Canvas, Color, EditError, Mode, ParticleId, ParticleSprite, SimulationConfig, Simulator,
};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(18, 18, 24);

#[derive(Parser, Debug)]
#[command(about = "Particles that repel from the pointer and from each other")]
struct Args {
    /// YAML file overriding the built-in simulation constants
    #[arg(short, long)]
    config: Option<PathBuf>,
}

// Draws sprites straight into the central panel's painter.
struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    selected: Option<ParticleId>,
}

impl Canvas for PainterCanvas<'_> {
    fn draw_particle(&mut self, sprite: &ParticleSprite) {
        let center = self.origin + egui::vec2(sprite.center.x, sprite.center.y);
        let [r, g, b] = sprite.color.to_array();
        self.painter
            .circle_filled(center, sprite.radius, egui::Color32::from_rgb(r, g, b));

        if self.selected == Some(sprite.id) {
            self.painter.circle_stroke(
                center,
                sprite.radius + 2.0,
                egui::Stroke::new(2.0, egui::Color32::WHITE),
            );
        }
    }
}

// Main application structure
struct ParticleSimulation {
    config: SimulationConfig,
    // created on the first frame, once the canvas size is known
    simulator: Option<Simulator>,
    selected: Option<ParticleId>,
    color_text: String,
    last_frame_time: Instant,
    update_time: f64,
}

impl ParticleSimulation {
    fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            simulator: None,
            selected: None,
            color_text: String::new(),
            last_frame_time: Instant::now(),
            update_time: 0.0,
        }
    }

    fn render_ui_panel(&mut self, ui: &mut egui::Ui, frame_time: f32) {
        ui.label(format!("FPS: {:.3}", 1.0 / frame_time));
        ui.label(format!("Frame Time: {:.3}ms", frame_time * 1000.0));
        ui.label(format!("Update Time: {:.3}ms", self.update_time * 1000.0));

        let Some(simulator) = self.simulator.as_mut() else {
            return;
        };

        ui.label(format!("Particles: {}", simulator.particles().len()));
        ui.separator();

        let mut mode = simulator.mode();
        ui.horizontal(|ui| {
            ui.label("Mode: ");
            ui.radio_value(&mut mode, Mode::Collision, "Collision");
            ui.radio_value(&mut mode, Mode::Edit, "Edit");
        });
        simulator.set_mode(mode);
        if mode == Mode::Collision {
            self.selected = None;
        }

        let mut leak = simulator.velocity_leak();
        ui.checkbox(&mut leak, "Velocity leak");
        simulator.set_velocity_leak(leak);

        ui.separator();

        let Some(id) = self.selected else {
            if mode == Mode::Edit {
                ui.label("Click a particle to select it.");
            }
            return;
        };
        let Some(current) = simulator.particle(id).cloned() else {
            return;
        };

        ui.heading(format!("Particle {}", id.index()));

        let mut color = current.color.to_array();
        ui.horizontal(|ui| {
            ui.label("Color: ");
            ui.color_edit_button_srgb(&mut color);
        });
        if Color::from(color) != current.color {
            report(simulator.set_color(id, color.into()));
            self.color_text = Color::from(color).to_string();
        }

        let mut hex_submitted = false;
        ui.horizontal(|ui| {
            ui.label("Hex: ");
            hex_submitted = ui.text_edit_singleline(&mut self.color_text).lost_focus();
        });
        if hex_submitted {
            match self.color_text.parse::<Color>() {
                Ok(parsed) => report(simulator.set_color(id, parsed)),
                Err(err) => log::warn!("{err}"),
            }
        }

        let sizes = simulator.config().min_radius()..=simulator.config().max_radius();
        let mut radius = current.radius;
        ui.horizontal(|ui| {
            ui.label("Radius: ");
            ui.add(egui::Slider::new(&mut radius, sizes));
        });
        if radius != current.radius {
            report(simulator.set_radius(id, radius));
        }

        let mut position = current.position;
        ui.horizontal(|ui| {
            ui.label("Position: ");
            ui.add(egui::DragValue::new(&mut position.x).speed(1.0).prefix("x: "));
            ui.add(egui::DragValue::new(&mut position.y).speed(1.0).prefix("y: "));
        });
        if position != current.position {
            report(simulator.set_position(id, position));
        }
    }
}

fn report(result: Result<(), EditError>) {
    if let Err(err) = result {
        log::warn!("edit rejected: {err}");
    }
}

impl eframe::App for ParticleSimulation {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let current_time = Instant::now();
        let frame_time = current_time.duration_since(self.last_frame_time);
        self.last_frame_time = current_time;

        egui::SidePanel::left("Control Panel").show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_ui_panel(ui, frame_time.as_secs_f32());
                ui.allocate_space(ui.available_size());
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                let arena = Arena::new(rect.width(), rect.height());

                if self.simulator.is_none() {
                    match Simulator::new(arena, self.config.clone()) {
                        Ok(simulator) => self.simulator = Some(simulator),
                        Err(err) => {
                            log::error!("failed to create the simulation: {err}");
                            return;
                        }
                    }
                }
                let Some(simulator) = self.simulator.as_mut() else {
                    return;
                };
                simulator.resize(arena);

                let to_arena = |pos: egui::Pos2| cgmath::vec2(pos.x - rect.min.x, pos.y - rect.min.y);
                let pointer = response.hover_pos().map(to_arena);

                if simulator.mode() == Mode::Edit {
                    if response.clicked() || response.drag_started() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            self.selected = simulator.find_particle_at(to_arena(pos));
                            if let Some(particle) = self.selected.and_then(|id| simulator.particle(id)) {
                                self.color_text = particle.color.to_string();
                            }
                        }
                    }
                    if response.dragged() {
                        if let (Some(id), Some(pos)) = (self.selected, response.interact_pointer_pos()) {
                            report(simulator.set_position(id, to_arena(pos)));
                        }
                    }
                }

                let painter = ui.painter_at(rect);
                let mut canvas = PainterCanvas {
                    painter: &painter,
                    origin: rect.min,
                    selected: self.selected,
                };

                let start_update = Instant::now();
                simulator.tick(pointer, &mut canvas);
                self.update_time = start_update.elapsed().as_secs_f64();
            });

        // Request continuous updates
        ctx.request_repaint();
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    log::info!("starting with {} particles", config.max_particles);

    eframe::run_native(
        "Particle Repel",
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            initial_window_size: Some(egui::vec2(1200.0, 800.0)),
            ..Default::default()
        },
        Box::new(move |_cc| Box::new(ParticleSimulation::new(config))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the window: {err}"))
}
