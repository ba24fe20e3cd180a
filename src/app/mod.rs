//! Application shell.
//!
//! [`App`] owns the window, renderer, scene, and input state, and drives
//! the winit event loop. Behavior is injected through an update closure that
//! runs once per frame before the scene update and render.

pub mod input;

use self::input::Input;

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::errors::Result;
use crate::renderer::{RenderSettings, Renderer};
use crate::scene::Scene;
use crate::utils::Timer;

pub type UpdateFn = Box<dyn FnMut(&mut Scene, &Input, f32)>;

pub struct App {
    window: Option<Arc<Window>>,
    pub title: String,
    pub renderer: Renderer,
    pub scene: Scene,

    update_fn: Option<UpdateFn>,
    timer: Timer,

    input: Input,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: None,
            title: "Viewer".into(),
            renderer: Renderer::new(RenderSettings::default()),
            scene: Scene::new(),
            update_fn: None,
            timer: Timer::new(),
            input: Input::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn set_update_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Scene, &Input, f32) + 'static,
    {
        self.update_fn = Some(Box::new(f));
        self
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn update(&mut self) {
        self.timer.tick();
        let dt = self.timer.dt_seconds();

        if let Some(update_fn) = &mut self.update_fn {
            update_fn(&mut self.scene, &self.input, dt);
        }

        self.input.end_frame();
        self.scene.update();
    }

    fn render(&mut self) {
        if let Err(e) = self.renderer.render(&self.scene) {
            log::error!("render failed: {e}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("initializing renderer backend");
        if let Err(e) = pollster::block_on(self.renderer.init(window)) {
            log::error!("fatal renderer error: {e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size.width, size.height);
                self.input.handle_resize(size.width, size.height);

                if size.height > 0 {
                    let aspect = size.width as f32 / size.height as f32;
                    if let Some((_, camera)) = self.scene.query_active_camera() {
                        camera.aspect = aspect;
                        camera.update_projection_matrix();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.handle_cursor_move(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.handle_mouse_input(state, button);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.handle_mouse_wheel(delta);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.input.handle_key(event.state, code, event.repeat);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
