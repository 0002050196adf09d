//! Interactive ant path viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the animation state
//! (path system, ants, configuration, drawing layers) and implements
//! [`eframe::App`] to render it and expose the parameter panel.

use crate::layer::Layer;
use ant_core::{
    animation::Animation,
    config::{
        ANT_INTERVAL_RANGE, ANT_RADIUS_RANGE, ANT_SPEED_RANGE, COLUMNS_RANGE, Config,
        EXPLORATION_RANGE, PATH_LOOP_CYCLE_RANGE, ROWS_RANGE,
    },
    fps::FpsReadout,
};
use eframe::App;
use glam::Vec2;
use std::path::PathBuf;
use tracing::{error, info};

/// Canvas size used until the first frame reports the real one.
const INITIAL_EXTENT: Vec2 = Vec2::new(1280.0, 720.0);

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(12, 10, 20);

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Build the config panel and status bar; the panel edits `cfg` in place.
/// 2. Take a sanitized copy of `cfg` for this frame.
/// 3. Regenerate if the canvas was resized, the grid shape changed or
///    "Generate New" was clicked.
/// 4. Tick the [`Animation`], rebuild the layers it asks for, paint both.
///
/// ### Fields
/// - `cfg` - Live configuration, written only by the panel.
/// - `config_path` - Where "Save cfg" writes `cfg` as JSON.
/// - `animation` - Path system, ants and FPS meter.
/// - `path_layer` / `ant_layer` - Retained shapes, path below ants.
/// - `readout` - FPS text refreshed once per second.
/// - `last_frame_time` - egui time of the previous frame, `None` right after
///   a regeneration.
/// - `grid_dragging` - A rows/columns slider is being dragged; regeneration
///   waits until it is released.
/// - `regenerate_requested` - "Generate New" was clicked.
/// - `status` - Result of the last save, shown in the status bar.
pub struct Viewer {
    cfg: Config,
    config_path: PathBuf,

    animation: Animation,
    path_layer: Layer,
    ant_layer: Layer,

    readout: FpsReadout,
    last_frame_time: Option<f64>,

    grid_dragging: bool,
    regenerate_requested: bool,
    status: Option<String>,
}

impl Viewer {
    /// Creates a viewer with a freshly generated path system and its first ant.
    pub fn new(cfg: Config, config_path: PathBuf, seed: u64) -> Self {
        let animation = Animation::new(&cfg.sanitized(), INITIAL_EXTENT, seed);
        let mut path_layer = Layer::default();
        path_layer.draw_paths(animation.system(), cfg.path_color);

        Self {
            cfg,
            config_path,
            animation,
            path_layer,
            ant_layer: Layer::default(),
            readout: FpsReadout::default(),
            last_frame_time: None,
            grid_dragging: false,
            regenerate_requested: false,
            status: None,
        }
    }

    fn needs_regeneration(&self, cfg: &Config, extent: Vec2) -> bool {
        let resized = (self.animation.extent() - extent).abs().max_element() >= 0.5;
        let regridded = !self.grid_dragging && self.animation.grid() != cfg.grid();
        self.regenerate_requested || resized || regridded
    }

    /// Replaces the path system and ants, and redraws the path layer.
    fn regenerate(&mut self, cfg: &Config, extent: Vec2) {
        self.animation.regenerate(cfg, extent);
        self.path_layer.clear();
        self.path_layer.draw_paths(self.animation.system(), cfg.path_color);
        self.ant_layer.clear();
        self.last_frame_time = None;
        self.regenerate_requested = false;
    }

    /// Runs one animation frame for a canvas of `extent` at egui time `now`.
    fn frame(&mut self, extent: Vec2, now: f64) {
        let cfg = self.cfg.sanitized();

        if self.needs_regeneration(&cfg, extent) {
            self.regenerate(&cfg, extent);
        }

        let dt = self.last_frame_time.map_or(0.0, |last| now - last);
        self.last_frame_time = Some(now);

        let report = self.animation.tick(&cfg, dt);
        if report.repaint_path {
            self.path_layer.draw_paths(self.animation.system(), cfg.path_color);
        }
        self.ant_layer.draw_ants(self.animation.ants(), &cfg);

        self.readout.update(dt, self.animation.fps());
    }

    fn save_config(&mut self) {
        match self.cfg.save(&self.config_path) {
            Ok(()) => {
                info!(path = %self.config_path.display(), "saved config");
                self.status = Some(format!("saved {}", self.config_path.display()));
            }
            Err(e) => {
                error!(error = %e, "could not save config");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Helper to draw a labeled sRGB color button.
    fn labeled_color(ui: &mut egui::Ui, label: &str, color: &mut [u8; 3]) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.color_edit_button_srgb(color);
        });
    }

    /// Builds the right-hand panel with all animation parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                self.grid_dragging = false;

                egui::CollapsingHeader::new("Ant Appearance")
                    .default_open(true)
                    .show(ui, |ui| {
                        Self::labeled_color(ui, "Ant Color", &mut self.cfg.ant_color);
                        Self::labeled_color(ui, "Exploring Ant", &mut self.cfg.ant_exploring_color);
                        ui.add(
                            egui::Slider::new(&mut self.cfg.ant_radius, ANT_RADIUS_RANGE)
                                .step_by(1.0)
                                .text("Ant Size"),
                        );
                    });

                egui::CollapsingHeader::new("Colony optimization parameters")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.add(
                            egui::Slider::new(&mut self.cfg.ant_speed, ANT_SPEED_RANGE)
                                .step_by(0.5)
                                .text("Ant Speed"),
                        );
                        ui.add(
                            egui::Slider::new(&mut self.cfg.ant_interval, ANT_INTERVAL_RANGE)
                                .text("New Ant Interval"),
                        );
                        ui.add(
                            egui::Slider::new(
                                &mut self.cfg.exploration_probability,
                                EXPLORATION_RANGE,
                            )
                            .step_by(0.01)
                            .text("Exploring %"),
                        );
                    });

                egui::CollapsingHeader::new("Path parameters")
                    .default_open(false)
                    .show(ui, |ui| {
                        Self::labeled_color(ui, "Path Color", &mut self.cfg.path_color);
                        let rows = ui.add(
                            egui::Slider::new(&mut self.cfg.rows, ROWS_RANGE).text("Max Path Rows"),
                        );
                        let columns = ui.add(
                            egui::Slider::new(&mut self.cfg.columns, COLUMNS_RANGE)
                                .text("Max Path Cols"),
                        );
                        self.grid_dragging = rows.dragged() || columns.dragged();
                        ui.add(
                            egui::Slider::new(&mut self.cfg.path_loop_cycle, PATH_LOOP_CYCLE_RANGE)
                                .text("Path Repaint Frames"),
                        );
                        if ui.button("Generate New").clicked() {
                            self.regenerate_requested = true;
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Reset cfg to default").clicked() {
                        self.cfg = Config::default();
                    }
                    if ui.button("Save cfg").clicked() {
                        self.save_config();
                    }
                });
            });
    }

    /// Builds the bottom status bar (FPS, ant and edge counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(self.readout.text());
                ui.separator();
                ui.label(format!("ants = {}", self.animation.ants().len()));
                ui.label(format!("edges = {}", self.animation.system().edge_count()));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status.as_str());
                }
            });
        });
    }

    /// Builds the central canvas: advances the animation and paints both layers.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(BACKGROUND))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                let now = ctx.input(|i| i.time);
                self.frame(Vec2::new(rect.width(), rect.height()), now);

                let origin = rect.min.to_vec2();
                self.path_layer.paint(&painter, origin);
                self.ant_layer.paint(&painter, origin);
            });
    }
}

impl App for Viewer {
    /// eframe callback, called once per displayed frame.
    ///
    /// Panels are built before the central canvas so that the canvas gets
    /// the remaining space; a repaint is always requested so the animation
    /// keeps running.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_config_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 17;

    fn viewer() -> Viewer {
        Viewer::new(
            Config::default(),
            std::env::temp_dir().join("ant-paths-viewer-test.json"),
            SEED,
        )
    }

    #[test]
    fn new_viewer_has_path_layer_and_first_ant() {
        let viewer = viewer();
        assert_eq!(viewer.animation.ants().len(), 1);
        assert_eq!(viewer.path_layer.len(), viewer.animation.system().edge_count());
        assert!(viewer.ant_layer.is_empty());
    }

    #[test]
    fn resize_regenerates_and_drops_ants() {
        let mut viewer = viewer();
        viewer.frame(INITIAL_EXTENT, 0.0);
        assert_eq!(viewer.animation.ants().len(), 1);

        viewer.frame(Vec2::new(900.0, 500.0), 0.016);

        assert_eq!(viewer.animation.extent(), Vec2::new(900.0, 500.0));
        assert!(viewer.animation.ants().is_empty());
        assert_eq!(viewer.path_layer.len(), viewer.animation.system().edge_count());
    }

    #[test]
    fn sub_pixel_resize_is_ignored() {
        let mut viewer = viewer();
        viewer.frame(INITIAL_EXTENT, 0.0);
        viewer.frame(INITIAL_EXTENT + Vec2::new(0.25, 0.0), 0.016);
        assert_eq!(viewer.animation.ants().len(), 1);
    }

    #[test]
    fn grid_change_waits_for_slider_release() {
        let mut viewer = viewer();
        viewer.cfg.columns = 7;
        viewer.grid_dragging = true;

        viewer.frame(INITIAL_EXTENT, 0.0);
        assert_eq!(viewer.animation.grid(), (10, 5));

        viewer.grid_dragging = false;
        viewer.frame(INITIAL_EXTENT, 0.016);
        assert_eq!(viewer.animation.grid(), (7, 5));
    }

    #[test]
    fn generate_new_request_is_consumed() {
        let mut viewer = viewer();
        viewer.frame(INITIAL_EXTENT, 0.0);

        viewer.regenerate_requested = true;
        viewer.frame(INITIAL_EXTENT, 0.016);

        assert!(!viewer.regenerate_requested);
        assert!(viewer.animation.ants().is_empty());
        assert_eq!(viewer.last_frame_time, Some(0.016));
    }

    #[test]
    fn ant_layer_tracks_live_ants() {
        let mut viewer = viewer();
        viewer.cfg.ant_interval = 5;

        let mut now = 0.0;
        for _ in 0..40 {
            viewer.frame(INITIAL_EXTENT, now);
            now += 1.0 / 60.0;
            let live = viewer.animation.ants().iter().filter(|a| !a.reached_end).count();
            assert_eq!(viewer.ant_layer.len(), live);
        }
        assert!(viewer.animation.ants().len() > 1);
    }

    #[test]
    fn out_of_range_config_is_sanitized_per_frame() {
        let mut viewer = viewer();
        viewer.cfg.rows = 0;
        viewer.cfg.ant_interval = 0;

        viewer.frame(INITIAL_EXTENT, 0.0);

        assert_eq!(viewer.animation.grid(), (10, 1));
        // The live config keeps what the user typed; only the snapshot is clamped.
        assert_eq!(viewer.cfg.rows, 0);
    }

    #[test]
    fn save_reports_status() {
        let mut viewer = viewer();
        viewer.save_config();
        let status = viewer.status.clone().unwrap_or_default();
        let _ = std::fs::remove_file(&viewer.config_path);
        assert!(status.starts_with("saved"), "status: {status}");
    }
}
