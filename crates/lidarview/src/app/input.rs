use std::sync::Arc;

use glam::Vec2;
use pollster::FutureExt;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use lidarview_core::LidarError;
use lidarview_render::RenderEngine;
use lidarview_ui::EguiIntegration;

use super::App;

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let [width, height] = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, LidarError::EventLoop(e.to_string()));
                return;
            }
        };

        let engine = match RenderEngine::new_windowed(window.clone()).block_on() {
            Ok(engine) => engine,
            Err(e) => {
                self.fail(event_loop, LidarError::RenderError(e.to_string()));
                return;
            }
        };

        let egui = EguiIntegration::new(&engine.device, engine.surface_format(), &window);
        log::info!(
            "window ready: {}x{} ({:?})",
            engine.width,
            engine.height,
            engine.surface_format()
        );

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.egui = Some(egui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            egui.handle_event(window, &event);
        }
        let ui_wants_pointer = self.egui.as_ref().is_some_and(EguiIntegration::wants_pointer);

        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.camera_input.button(button, state, ui_wants_pointer);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.camera_input
                    .cursor_moved(position, self.scene.camera_mut(), ui_wants_pointer);
            }
            WindowEvent::CursorLeft { .. } => {
                self.camera_input.cursor_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.camera_input
                    .scroll(delta, self.scene.camera_mut(), ui_wants_pointer);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.close_requested = true;
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}
