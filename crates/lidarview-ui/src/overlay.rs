//! Axis labels painted behind egui windows and over the 3D scene.

use egui::{Color32, Context, FontId, LayerId, Painter, Pos2, Rect};
use glam::Vec2;
use lidarview_render::labels::{LABEL_BACKGROUND, LABEL_PADDING};
use lidarview_render::{AxisLabel, LabelSurface};

/// Label font size in points.
const LABEL_FONT_SIZE: f32 = 12.0;

/// [`LabelSurface`] backed by the egui background layer.
pub struct EguiLabelSurface {
    painter: Painter,
    pixels_per_point: f32,
    font: FontId,
}

impl EguiLabelSurface {
    /// Creates a surface for the current pass of `ctx`.
    pub fn new(ctx: &Context) -> Self {
        Self {
            painter: ctx.layer_painter(LayerId::background()),
            pixels_per_point: ctx.pixels_per_point(),
            font: FontId::proportional(LABEL_FONT_SIZE),
        }
    }
}

/// Converts a physical pixel position to egui points.
pub fn to_points(physical: Vec2, pixels_per_point: f32) -> Pos2 {
    let p = physical / pixels_per_point.max(f32::EPSILON);
    Pos2::new(p.x, p.y)
}

fn color32([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl LabelSurface for EguiLabelSurface {
    fn draw_label(&mut self, label: &AxisLabel) {
        let color = color32(label.color);
        let galley = self
            .painter
            .layout_no_wrap(label.text.clone(), self.font.clone(), color);

        let center = to_points(label.screen_pos, self.pixels_per_point);
        let rect = Rect::from_center_size(center, galley.size());

        self.painter.rect_filled(
            rect.expand(LABEL_PADDING),
            0.0,
            color32(LABEL_BACKGROUND),
        );
        self.painter.galley(rect.min, galley, color);
    }
}
