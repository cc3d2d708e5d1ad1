//! Interactive particle field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (field, connection buffer, configuration) and implements
//! [`eframe::App`] to drive one tick per rendered frame and paint the
//! result.

use eframe::App;
use field_core::{
    config::Config,
    connections::ConnectionBuffer,
    error::ConfigError,
    field::ParticleField,
    phases,
};
use glam::Vec2;
use rand::rng;

/// Bounds used until the first real canvas size is observed.
const INITIAL_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Main application state for the particle field viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`ParticleField`], [`ConnectionBuffer`], [`Config`].
/// - eframe/egui callbacks for drawing and input.
/// - Host-event plumbing: pointer tracking and debounced viewport rebuilds.
///
/// The typical per-frame update is:
/// 1. Track the canvas size and rebuild the population if it changed.
/// 2. Forward the hover position to the field as the repulsion source.
/// 3. If `running`, advance one tick and request the next repaint.
/// 4. Paint particles and connections.
///
/// ### Fields
/// - `field` - Current particle population, bounds, and pointer state.
/// - `cfg` - Global simulation configuration (counts, radii, thresholds).
/// - `links` - Per-frame connection buffer shared between tick and painter.
///
/// - `rng` - Random number generator used for population rebuilds.
///
/// - `running` - Whether the simulation is currently auto-advancing.
///   While false, no repaint is requested and the loop stops.
///
/// - `viewport_adopted` - Whether a real canvas size has been seen yet;
///   the first one is adopted without debouncing.
/// - `pending_viewport` - Most recently observed canvas size.
/// - `pending_since` - Time stamp at which `pending_viewport` last changed.
///
/// - `last_tick_time` - Time stamp of the last tick (egui time).
/// - `last_tick_dt` - Time delta between the last two ticks (for display only).
pub struct Viewer {
    field: ParticleField,
    cfg: Config,
    links: ConnectionBuffer,

    rng: rand::rngs::ThreadRng,

    running: bool,

    viewport_adopted: bool,
    pending_viewport: Vec2,
    pending_since: f64,

    last_tick_time: f64,
    last_tick_dt: f64,
}

impl Viewer {
    /// Creates a viewer with the default (full) configuration.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(Config::default())
    }

    /// Creates a viewer with an explicit configuration.
    ///
    /// The initial population spans [`INITIAL_VIEWPORT`] and is rebuilt
    /// at the real canvas size on the first rendered frame.
    pub fn with_config(cfg: Config) -> Result<Self, ConfigError> {
        let mut rng = rng();
        let field = ParticleField::generate(INITIAL_VIEWPORT, &cfg, &mut rng)?;
        log::info!("particle field ready: {} particles", field.particles.len());

        Ok(Self {
            field,
            cfg,
            links: ConnectionBuffer::new(),
            rng,
            running: true,
            viewport_adopted: false,
            pending_viewport: INITIAL_VIEWPORT,
            pending_since: 0.0,
            last_tick_time: 0.0,
            last_tick_dt: 0.0,
        })
    }

    /// Advances the simulation by a single tick.
    ///
    /// The tick consists of:
    /// 1. [`phases::pulse_phase`] — advance radius oscillations.
    /// 2. [`phases::motion_phase`] — integrate and reflect at the edges.
    /// 3. [`phases::repulsion_phase`] — push particles away from the pointer.
    /// 4. [`phases::connection_phase`] — refill `links` for the painter.
    fn step_once(&mut self) {
        phases::pulse_phase(&mut self.field, &self.cfg);
        phases::motion_phase(&mut self.field, &self.cfg);
        phases::repulsion_phase(&mut self.field, &self.cfg);
        phases::connection_phase(&self.field, &self.cfg, &mut self.links);
    }

    /// Rebuilds the population at the given bounds under the current config.
    ///
    /// A config the core rejects leaves the old population in place.
    fn rebuild(&mut self, bounds: Vec2) {
        if let Err(err) = self.field.regenerate(bounds, &self.cfg, &mut self.rng) {
            log::error!("rebuild skipped: {err}");
            return;
        }
        phases::connection_phase(&self.field, &self.cfg, &mut self.links);
        log::debug!(
            "rebuilt {} particles for {}x{} viewport",
            self.field.particles.len(),
            bounds.x,
            bounds.y
        );
    }

    /// Tracks canvas size changes and rebuilds the population when one
    /// settles.
    ///
    /// The first observed size is adopted immediately so the initial
    /// population spans the real canvas. Later changes must hold still
    /// for `cfg.resize_debounce` seconds before triggering one wholesale
    /// rebuild, coalescing resize bursts. A debounce of zero rebuilds on
    /// every change.
    fn sync_viewport(&mut self, size: Vec2, now: f64) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        if size != self.pending_viewport {
            self.pending_viewport = size;
            self.pending_since = now;
        }
        if size == self.field.bounds {
            self.viewport_adopted = true;
            return;
        }
        if !self.viewport_adopted || now - self.pending_since >= self.cfg.resize_debounce {
            self.rebuild(size);
            self.viewport_adopted = true;
        }
    }

    /// Builds the top panel UI (run controls, rebuild, presets).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Rebuild").clicked() {
                    self.rebuild(self.field.bounds);
                }

                ui.separator();

                if ui.button("Full preset").clicked() {
                    self.cfg = Config::default();
                    self.rebuild(self.field.bounds);
                }
                if ui.button("Minimal preset").clicked() {
                    self.cfg = Config::minimal();
                    self.rebuild(self.field.bounds);
                }
            });
        });
    }

    /// Builds the bottom status bar (tick time, particle and link counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.1} ms", self.last_tick_dt * 1000.0));
                ui.separator();
                ui.label(format!("particles = {}", self.field.particles.len()));
                ui.label(format!("links = {}", self.links.len()));
            });
        });
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the right-hand configuration panel for simulation parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Population (applies on rebuild)");
                Self::labeled_drag_usize(
                    ui,
                    "particle_count:",
                    &mut self.cfg.particle_count,
                    0..=500,
                    1.0,
                );
                Self::labeled_drag_f32(ui, "max_speed:", &mut self.cfg.max_speed, 0.0..=5.0, 0.01);
                Self::labeled_drag_f32(
                    ui,
                    "radius_min:",
                    &mut self.cfg.radius_min,
                    0.1..=10.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "radius_max:",
                    &mut self.cfg.radius_max,
                    0.1..=10.0,
                    0.1,
                );

                ui.separator();
                ui.label("Motion");
                ui.add(
                    egui::Slider::new(&mut self.cfg.bounce_damping, 0.0..=1.0)
                        .text("bounce_damping"),
                );

                ui.separator();
                ui.label("Pulse & glow");
                ui.checkbox(&mut self.cfg.pulse, "pulse radii");
                Self::labeled_drag_f32(
                    ui,
                    "pulse_depth:",
                    &mut self.cfg.pulse_depth,
                    0.0..=1.0,
                    0.01,
                );
                ui.checkbox(&mut self.cfg.glow, "glow rendering");

                ui.separator();
                ui.label("Pointer repulsion");
                Self::labeled_drag_f32(
                    ui,
                    "pointer_radius:",
                    &mut self.cfg.pointer_radius,
                    0.0..=500.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "push_strength:",
                    &mut self.cfg.push_strength,
                    0.0..=10.0,
                    0.05,
                );

                ui.separator();
                ui.label("Connections");
                Self::labeled_drag_f32(
                    ui,
                    "link_distance:",
                    &mut self.cfg.link_distance,
                    0.0..=400.0,
                    1.0,
                );
                Self::labeled_drag_f32(ui, "link_alpha:", &mut self.cfg.link_alpha, 0.0..=1.0, 0.01);
                Self::labeled_drag_f32(ui, "link_width:", &mut self.cfg.link_width, 0.1..=5.0, 0.1);

                ui.separator();
                ui.label("Resize");
                ui.horizontal(|ui| {
                    ui.label("debounce (s):");
                    ui.add(
                        egui::DragValue::new(&mut self.cfg.resize_debounce)
                            .range(0.0..=2.0)
                            .speed(0.01),
                    );
                });

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
            });
    }

    /// Builds the central canvas: input plumbing, ticking, and painting.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(18, 16, 20)))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let painter = ui.painter_at(rect);
                let now = ctx.input(|i| i.time);

                self.sync_viewport(Vec2::new(rect.width(), rect.height()), now);

                // Hovering sets the repulsion source in canvas coordinates;
                // leaving the canvas clears it.
                match response.hover_pos() {
                    Some(p) => self.field.set_pointer(canvas_pos(p, rect)),
                    None => self.field.clear_pointer(),
                }

                if self.running {
                    if self.last_tick_time > 0.0 {
                        self.last_tick_dt = now - self.last_tick_time;
                    }
                    self.step_once();
                    self.last_tick_time = now;

                    ctx.request_repaint();
                }

                self.paint_field(&painter, rect);
            });
    }

    /// Paints the current field state: discs first, connection lines on top.
    fn paint_field(&self, painter: &egui::Painter, rect: egui::Rect) {
        for p in &self.field.particles {
            let center = to_screen(p.pos, rect);
            let radius = p.radius * p.pulse_scale(&self.cfg);
            let color = egui::Color32::from_rgb(p.color[0], p.color[1], p.color[2]);

            if self.cfg.glow {
                painter.add(glow_shape(center, radius * 2.0, color));
            } else {
                painter.circle_filled(center, radius, color);
            }
        }

        let [r, g, b] = self.cfg.link_color;
        for link in self.links.iter() {
            let a = to_screen(self.field.particles[link.a].pos, rect);
            let b2 = to_screen(self.field.particles[link.b].pos, rect);
            let color =
                egui::Color32::from_rgba_unmultiplied(r, g, b, (link.strength * 255.0) as u8);
            painter.line_segment([a, b2], egui::Stroke::new(self.cfg.link_width, color));
        }
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

/// Maps a field-space position onto the canvas rect.
fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
}

/// Maps an egui pointer position into field space.
fn canvas_pos(p: egui::Pos2, rect: egui::Rect) -> Vec2 {
    Vec2::new(p.x - rect.min.x, p.y - rect.min.y)
}

/// A radial glow: a triangle fan fading from the particle color at the
/// center to fully transparent at the rim.
fn glow_shape(center: egui::Pos2, radius: f32, color: egui::Color32) -> egui::Shape {
    use std::f32::consts::TAU;

    let segments = 24u32;
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, color);
    for i in 0..=segments {
        let t = (i as f32) / (segments as f32) * TAU;
        mesh.colored_vertex(
            center + egui::vec2(t.cos(), t.sin()) * radius,
            egui::Color32::TRANSPARENT,
        );
    }
    for i in 0..segments {
        mesh.add_triangle(0, i + 1, i + 2);
    }

    egui::Shape::mesh(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_core::particle::Particle;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(100.0, 50.0), egui::vec2(800.0, 600.0))
    }

    fn particle_at(pos: Vec2, vel: Vec2) -> Particle {
        Particle {
            pos,
            vel,
            radius: 2.0,
            color: [200, 200, 200],
            pulse_phase: 0.0,
            pulse_speed: 0.03,
        }
    }

    #[test]
    fn new_initializes_population_and_runs() {
        let viewer = Viewer::new().unwrap();

        assert_eq!(
            viewer.field.particles.len(),
            viewer.cfg.particle_count
        );
        assert!(viewer.running);
        assert!(viewer.links.is_empty());
        assert!(!viewer.viewport_adopted);
    }

    #[test]
    fn with_config_rejects_invalid_config() {
        let mut cfg = Config::default();
        cfg.palette.clear();

        assert!(Viewer::with_config(cfg).is_err());
    }

    #[test]
    fn step_once_advances_particles_and_collects_links() {
        let mut viewer = Viewer::with_config(Config::minimal()).unwrap();

        // Replace the random population with a deterministic pair that
        // is close enough to link.
        viewer.field = ParticleField::from_particles(
            Vec2::new(800.0, 600.0),
            vec![
                particle_at(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0)),
                particle_at(Vec2::new(150.0, 100.0), Vec2::new(-1.0, 0.0)),
            ],
        );

        viewer.step_once();

        assert_eq!(viewer.field.particles[0].pos, Vec2::new(101.0, 100.0));
        assert_eq!(viewer.field.particles[1].pos, Vec2::new(149.0, 100.0));
        assert_eq!(viewer.links.len(), 1);
    }

    #[test]
    fn sync_viewport_adopts_the_first_size_immediately() {
        let mut viewer = Viewer::new().unwrap();
        assert_eq!(viewer.cfg.resize_debounce, 0.25);

        viewer.sync_viewport(Vec2::new(800.0, 600.0), 10.0);

        assert_eq!(viewer.field.bounds, Vec2::new(800.0, 600.0));
        assert!(viewer.viewport_adopted);
    }

    #[test]
    fn sync_viewport_debounces_later_changes() {
        let mut viewer = Viewer::new().unwrap();
        viewer.sync_viewport(Vec2::new(800.0, 600.0), 10.0);

        // A fresh change waits out the quiet period.
        viewer.sync_viewport(Vec2::new(900.0, 600.0), 20.0);
        assert_eq!(viewer.field.bounds, Vec2::new(800.0, 600.0));

        // Still held during the quiet period.
        viewer.sync_viewport(Vec2::new(900.0, 600.0), 20.1);
        assert_eq!(viewer.field.bounds, Vec2::new(800.0, 600.0));

        // Once the size has held still long enough, the rebuild fires.
        viewer.sync_viewport(Vec2::new(900.0, 600.0), 20.3);
        assert_eq!(viewer.field.bounds, Vec2::new(900.0, 600.0));
        assert_eq!(viewer.field.particles.len(), viewer.cfg.particle_count);
    }

    #[test]
    fn sync_viewport_restarts_the_quiet_period_on_every_change() {
        let mut viewer = Viewer::new().unwrap();
        viewer.sync_viewport(Vec2::new(800.0, 600.0), 10.0);

        // A burst of distinct sizes keeps pushing the deadline out.
        viewer.sync_viewport(Vec2::new(850.0, 600.0), 20.0);
        viewer.sync_viewport(Vec2::new(900.0, 600.0), 20.2);
        viewer.sync_viewport(Vec2::new(950.0, 600.0), 20.4);
        assert_eq!(viewer.field.bounds, Vec2::new(800.0, 600.0));

        viewer.sync_viewport(Vec2::new(950.0, 600.0), 20.7);
        assert_eq!(viewer.field.bounds, Vec2::new(950.0, 600.0));
    }

    #[test]
    fn sync_viewport_is_immediate_with_zero_debounce() {
        let mut viewer = Viewer::with_config(Config::minimal()).unwrap();
        viewer.sync_viewport(Vec2::new(800.0, 600.0), 10.0);

        viewer.sync_viewport(Vec2::new(640.0, 480.0), 10.1);

        assert_eq!(viewer.field.bounds, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn sync_viewport_ignores_degenerate_sizes() {
        let mut viewer = Viewer::new().unwrap();
        viewer.sync_viewport(Vec2::new(0.0, 600.0), 10.0);

        assert_eq!(viewer.field.bounds, INITIAL_VIEWPORT);
    }

    #[test]
    fn screen_mapping_roundtrips() {
        let rect = test_rect();
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(799.0, 599.0),
        ];

        for p in points {
            let screen = to_screen(p, rect);
            let back = canvas_pos(screen, rect);
            assert_eq!(back, p);
        }
    }
}
