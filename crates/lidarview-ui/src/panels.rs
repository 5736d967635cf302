//! UI panel builders.

use egui::{Align2, Button, Color32, Context, Frame, Slider, Ui, Window};
use lidarview_core::{ColorMode, ViewerConfig};
use lidarview_render::{Axis, SceneRenderer, ViewPreset};

/// Window-level UI state that lives across frames.
#[derive(Debug, Clone)]
pub struct ControlPanelState {
    /// Number of points the next "Generate" produces.
    pub point_count: u32,
    pub min_point_count: u32,
    pub max_point_count: u32,
    pub show_control_panel: bool,
    pub show_stats: bool,
    /// Clear color, display-space RGB.
    pub background_color: [f32; 3],
}

impl ControlPanelState {
    /// Initial state derived from the viewer configuration.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            point_count: config.clamped_initial_point_count(),
            min_point_count: config.min_point_count,
            max_point_count: config.max_point_count,
            show_control_panel: true,
            show_stats: true,
            background_color: config.background_color.to_array(),
        }
    }
}

impl Default for ControlPanelState {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

/// Actions requested through the control panel during one frame.
///
/// Option edits (point size, color mode, grid) are applied in place; these
/// are the ones the caller performs after the frame is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelResponse {
    /// Generate a new cloud of `ControlPanelState::point_count` points.
    pub generate: bool,
    pub clear: bool,
    pub reset_camera: bool,
    pub preset: Option<ViewPreset>,
}

impl PanelResponse {
    /// Whether any action was requested.
    pub fn any(&self) -> bool {
        self.generate || self.clear || self.reset_camera || self.preset.is_some()
    }
}

/// Builds the "Control Panel" window.
pub fn build_control_panel(
    ctx: &Context,
    state: &mut ControlPanelState,
    scene: &mut SceneRenderer,
) -> PanelResponse {
    let mut response = PanelResponse::default();
    if !state.show_control_panel {
        return response;
    }

    let mut open = true;
    Window::new("Control Panel")
        .open(&mut open)
        .default_pos([10.0, 10.0])
        .default_size([350.0, 400.0])
        .show(ctx, |ui| {
            ui.label("LIDAR Point Cloud Viewer");
            ui.separator();

            ui.label(format!("Points: {}", scene.point_count()));
            ui.add_space(4.0);

            build_display_section(ui, scene);
            ui.separator();
            build_grid_section(ui, scene);
            ui.separator();
            build_generation_section(ui, state, &mut response);
            ui.separator();
            build_camera_section(ui, &mut response);
            ui.separator();

            ui.checkbox(&mut state.show_stats, "Show Statistics");
            ui.horizontal(|ui| {
                ui.label("Background:");
                ui.color_edit_button_rgb(&mut state.background_color);
            });
        });
    state.show_control_panel = open;

    response
}

fn build_display_section(ui: &mut Ui, scene: &mut SceneRenderer) {
    let mut point_size = scene.options().point_size;
    if ui
        .add(Slider::new(&mut point_size, 0.1..=10.0).text("Point Size"))
        .changed()
    {
        scene.set_point_size(point_size);
    }

    let mut mode = scene.options().color_mode;
    egui::ComboBox::from_label("Color Mode")
        .selected_text(mode.name())
        .show_ui(ui, |ui| {
            for candidate in ColorMode::ALL {
                ui.selectable_value(&mut mode, candidate, candidate.name());
            }
        });
    if mode != scene.options().color_mode {
        scene.set_color_mode(mode);
    }
}

fn build_grid_section(ui: &mut Ui, scene: &mut SceneRenderer) {
    ui.label("Grid Settings");

    let mut show_grid = scene.options().show_grid;
    if ui.checkbox(&mut show_grid, "Show Grid").changed() {
        scene.set_show_grid(show_grid);
    }
    if !show_grid {
        return;
    }

    let mut spacing = scene.options().grid_spacing();
    let slider = Slider::new(&mut spacing, 0.1..=10.0)
        .text("Grid Spacing")
        .suffix(" units")
        .fixed_decimals(1);
    if ui.add(slider).changed() {
        if let Err(e) = scene.set_grid_spacing(spacing) {
            log::warn!("grid spacing rejected: {e}");
        }
    }

    let mut show_labels = scene.options().show_axis_labels;
    if ui.checkbox(&mut show_labels, "Show Axis Labels").changed() {
        scene.set_show_axis_labels(show_labels);
    }

    ui.label("Grid helps visualize scale");
    ui.horizontal(|ui| {
        for (axis, name) in [(Axis::X, "X"), (Axis::Y, "Y"), (Axis::Z, "Z")] {
            let [r, g, b, _] = lidarview_render::labels::label_color(axis);
            ui.colored_label(Color32::from_rgb(r, g, b), format!("{name}-axis"));
        }
    });
}

fn build_generation_section(
    ui: &mut Ui,
    state: &mut ControlPanelState,
    response: &mut PanelResponse,
) {
    ui.label("Point Cloud Generation");

    ui.add(
        Slider::new(
            &mut state.point_count,
            state.min_point_count..=state.max_point_count,
        )
        .text("Num Points")
        .logarithmic(true),
    );

    let width = ui.available_width();
    if ui
        .add(Button::new("Generate New Cloud").min_size([width, 0.0].into()))
        .clicked()
    {
        response.generate = true;
    }
    if ui
        .add(Button::new("Clear Point Cloud").min_size([width, 0.0].into()))
        .clicked()
    {
        response.clear = true;
    }
}

fn build_camera_section(ui: &mut Ui, response: &mut PanelResponse) {
    ui.label("Camera Controls");

    let width = ui.available_width();
    if ui
        .add(Button::new("Reset Camera").min_size([width, 0.0].into()))
        .clicked()
    {
        response.reset_camera = true;
    }

    ui.label("View Presets:");
    let half = (width - ui.spacing().item_spacing.x) * 0.5;
    for row in ViewPreset::ALL.chunks(2) {
        ui.horizontal(|ui| {
            for &preset in row {
                if ui
                    .add(Button::new(preset.name()).min_size([half, 0.0].into()))
                    .clicked()
                {
                    response.preset = Some(preset);
                }
            }
        });
    }

    ui.add_space(4.0);
    ui.label("Left Mouse: Rotate");
    ui.label("Right Mouse: Pan");
    ui.label("Scroll Wheel: Zoom");
}

/// Builds the statistics overlay in the top-right corner.
pub fn build_stats_overlay(ctx: &Context, fps: f32, frame_time_ms: f32, point_count: usize) {
    let frame = Frame::window(&ctx.style()).fill(Color32::from_black_alpha(90));

    Window::new("Statistics")
        .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .frame(frame)
        .show(ctx, |ui| {
            ui.label("Performance");
            ui.separator();
            ui.label(format!("FPS: {fps:.1}"));
            ui.label(format!("Frame Time: {frame_time_ms:.3} ms"));
            ui.label(format!("Points: {point_count}"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidarview_core::Vec3;

    #[test]
    fn test_state_from_config_clamps_count() {
        let config = ViewerConfig {
            initial_point_count: 5,
            background_color: Vec3::new(0.2, 0.3, 0.4),
            ..ViewerConfig::default()
        };
        let state = ControlPanelState::from_config(&config);
        assert_eq!(state.point_count, config.min_point_count);
        assert_eq!(state.background_color, [0.2, 0.3, 0.4]);
        assert!(state.show_control_panel);
    }

    #[test]
    fn test_panel_without_clicks_requests_nothing() {
        let ctx = Context::default();
        let mut state = ControlPanelState::default();
        let mut scene = SceneRenderer::new();
        let mut response = PanelResponse::default();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = build_control_panel(ctx, &mut state, &mut scene);
            build_stats_overlay(ctx, 60.0, 16.6, scene.point_count());
        });

        assert!(!response.any());
        assert!(state.show_control_panel);
    }

    #[test]
    fn test_hidden_panel_is_skipped() {
        let ctx = Context::default();
        let mut state = ControlPanelState {
            show_control_panel: false,
            ..ControlPanelState::default()
        };
        let mut scene = SceneRenderer::new();

        let mut response = PanelResponse {
            clear: true,
            ..PanelResponse::default()
        };
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = build_control_panel(ctx, &mut state, &mut scene);
        });
        assert_eq!(response, PanelResponse::default());
        assert!(!state.show_control_panel);
    }

    #[test]
    fn test_response_any() {
        let response = PanelResponse {
            preset: Some(ViewPreset::Top),
            ..PanelResponse::default()
        };
        assert!(response.any());
    }
}
