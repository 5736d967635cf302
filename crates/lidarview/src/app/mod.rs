//! Application window and event loop management.

mod input;
mod render;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::Window;

use lidarview_core::{generate_lidar_scene, LidarError, Result, ViewerConfig};
use lidarview_render::{RenderEngine, SceneRenderer};
use lidarview_ui::{ControlPanelState, EguiIntegration, PanelResponse};

use crate::camera_input::CameraInput;
use crate::frame_timer::FrameTimer;

/// The viewer application state.
pub struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    engine: Option<RenderEngine>,
    egui: Option<EguiIntegration>,
    scene: SceneRenderer,
    panel: ControlPanelState,
    camera_input: CameraInput,
    timer: FrameTimer,
    rng: StdRng,
    close_requested: bool,
    /// First fatal error, reported by [`run`] once the loop exits.
    error: Option<LidarError>,
}

impl App {
    /// Creates the application and generates the initial cloud.
    pub fn new(config: ViewerConfig) -> Self {
        let mut rng = StdRng::from_entropy();
        let mut scene = SceneRenderer::with_options(config.render.clone());
        let panel = ControlPanelState::from_config(&config);

        scene.set_point_cloud(generate_lidar_scene(panel.point_count as usize, &mut rng));

        Self {
            config,
            window: None,
            engine: None,
            egui: None,
            scene,
            panel,
            camera_input: CameraInput::new(),
            timer: FrameTimer::new(),
            rng,
            close_requested: false,
            error: None,
        }
    }

    /// The scene being displayed.
    pub fn scene(&self) -> &SceneRenderer {
        &self.scene
    }

    /// Performs the actions requested through the control panel.
    pub fn apply_panel_actions(&mut self, actions: PanelResponse) {
        if actions.generate {
            let count = self.panel.point_count as usize;
            let samples = generate_lidar_scene(count, &mut self.rng);
            self.scene.set_point_cloud(samples);
        }
        if actions.clear {
            self.scene.clear_point_cloud();
        }
        if actions.reset_camera {
            self.scene.reset_camera();
        }
        if let Some(preset) = actions.preset {
            self.scene.set_view(preset);
        }
    }

    /// Records a fatal error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: LidarError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }
}

/// Opens the viewer window and blocks until it is closed.
pub fn run(config: ViewerConfig) -> Result<()> {
    config.validate()?;

    let event_loop = EventLoop::new().map_err(|e| LidarError::EventLoop(e.to_string()))?;
    let mut app = App::new(config);

    event_loop
        .run_app(&mut app)
        .map_err(|e| LidarError::EventLoop(e.to_string()))?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidarview_render::ViewPreset;

    fn small_config() -> ViewerConfig {
        ViewerConfig {
            initial_point_count: 2_000,
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn test_new_app_has_initial_cloud() {
        let app = App::new(small_config());
        assert_eq!(app.scene().point_count(), 2_000);
        assert!(app.scene().camera().distance > 0.0);
    }

    #[test]
    fn test_panel_actions() {
        let mut app = App::new(small_config());

        app.apply_panel_actions(PanelResponse {
            clear: true,
            ..PanelResponse::default()
        });
        assert_eq!(app.scene().point_count(), 0);

        app.panel.point_count = 1_500;
        app.apply_panel_actions(PanelResponse {
            generate: true,
            preset: Some(ViewPreset::Top),
            ..PanelResponse::default()
        });
        assert_eq!(app.scene().point_count(), 1_500);
        assert_eq!(app.scene().camera().pitch, 89.0);
    }

    #[test]
    fn test_reset_action_restores_pose() {
        let mut app = App::new(small_config());
        app.scene.camera_mut().orbit(90.0, 20.0);
        app.apply_panel_actions(PanelResponse {
            reset_camera: true,
            ..PanelResponse::default()
        });
        assert_eq!(app.scene().camera().yaw, 45.0);
        assert_eq!(app.scene().camera().pitch, 30.0);
    }
}
