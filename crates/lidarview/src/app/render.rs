use egui_wgpu::ScreenDescriptor;
use lidarview_render::RenderError;
use lidarview_ui::{build_control_panel, build_stats_overlay, EguiLabelSurface};

use super::App;

impl App {
    /// Renders one frame.
    ///
    /// Panel edits are applied before the frame plan is computed; panel
    /// actions run after present.
    pub(super) fn render(&mut self) {
        let (Some(window), Some(engine), Some(egui)) =
            (&self.window, &mut self.engine, &mut self.egui)
        else {
            return;
        };

        self.timer.tick();
        let (width, height) = engine.dimensions();

        egui.begin_frame(window);
        let actions = build_control_panel(&egui.context, &mut self.panel, &mut self.scene);
        if self.panel.show_stats {
            build_stats_overlay(
                &egui.context,
                self.timer.fps(),
                self.timer.frame_time_ms(),
                self.scene.point_count(),
            );
        }

        // One plan per frame: labels and geometry share its transform.
        let plan = self.scene.prepare_frame(width, height);
        let mut labels = EguiLabelSurface::new(&egui.context);
        self.scene.draw_axis_labels(&plan, &mut labels);
        let egui_output = egui.end_frame(window);

        let output = match engine.acquire_frame() {
            Ok(output) => output,
            Err(RenderError::SurfaceLost | RenderError::SurfaceOutdated) => {
                engine.reconfigure();
                return;
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("out of memory");
                self.close_requested = true;
                return;
            }
            Err(e) => {
                log::warn!("skipping frame: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let stats = self.scene.draw_scene(&plan, &mut *engine);
        log::trace!(
            "frame: {} segments, {} points",
            stats.line_segments,
            stats.points
        );

        let mut encoder = engine
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        let [r, g, b] = self.panel.background_color;
        let clear_color = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };
        engine.encode_scene(&mut encoder, &view, clear_color);

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };
        egui.render(
            &engine.device,
            &engine.queue,
            &mut encoder,
            &view,
            &screen_descriptor,
            egui_output,
        );

        engine.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        output.present();

        self.apply_panel_actions(actions);
    }
}
