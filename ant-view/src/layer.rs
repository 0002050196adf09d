//! Retained drawing layers.
//!
//! egui repaints everything each frame, so a "canvas" here is a list of
//! shapes in canvas-local coordinates that is rebuilt only when its owner
//! says so and painted, offset to the canvas origin, every frame.

use ant_core::{ant::Ant, config::Config, generator::PathSystem};
use glam::Vec2;

/// Stroke width of path segments, in points.
pub const PATH_STROKE_WIDTH: f32 = 1.0;

#[derive(Default)]
pub struct Layer {
    shapes: Vec<egui::Shape>,
}

#[inline]
fn to_pos(p: Vec2) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

#[inline]
pub fn rgb(color: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}

impl Layer {
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Redraws every distinct segment of `system` in `color`.
    pub fn draw_paths(&mut self, system: &PathSystem, color: [u8; 3]) {
        let stroke = egui::Stroke::new(PATH_STROKE_WIDTH, rgb(color));
        self.shapes.clear();
        self.shapes.extend(
            system
                .edges()
                .map(|edge| egui::Shape::line_segment([to_pos(edge.from), to_pos(edge.to)], stroke)),
        );
    }

    /// Redraws all ants that are still walking. Finished ants draw nothing.
    pub fn draw_ants(&mut self, ants: &[Ant], cfg: &Config) {
        let (walking, exploring) = (rgb(cfg.ant_color), rgb(cfg.ant_exploring_color));
        self.shapes.clear();
        self.shapes.extend(ants.iter().filter(|a| !a.reached_end).map(|a| {
            let fill = if a.exploring { exploring } else { walking };
            egui::Shape::circle_filled(to_pos(a.pos), cfg.ant_radius, fill)
        }));
    }

    /// Paints the layer with its local origin at `origin` (screen space).
    pub fn paint(&self, painter: &egui::Painter, origin: egui::Vec2) {
        painter.extend(self.shapes.iter().cloned().map(|mut shape| {
            shape.translate(origin);
            shape
        }));
    }
}
