// ============================================
// App - Главный обработчик приложения
// ============================================

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use crate::space::systems::{InitSystem, InputAction, InputSystem, RenderSystem, UpdateSystem};
use super::config::SpaceConfig;
use super::error::SpaceError;
use super::resources::SpaceResources;

/// Главное приложение
pub struct App {
    resources: SpaceResources,
    /// Фатальная ошибка, остановившая цикл событий
    error: Option<SpaceError>,
}

impl App {
    pub fn new(config: SpaceConfig) -> Result<Self, SpaceError> {
        Ok(Self {
            resources: InitSystem::create_resources(config)?,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SpaceError) {
        log::error!("[APP] {}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.resources.last_frame).as_secs_f64();
        self.resources.last_frame = now;

        // Update
        let frame = UpdateSystem::update(&mut self.resources, dt);

        // Render
        if let Err(e) = RenderSystem::render(&mut self.resources, &frame) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(window) = &self.resources.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resources.window.is_none() {
            if let Err(e) = InitSystem::init_window(&mut self.resources, event_loop) {
                self.fail(event_loop, e);
                return;
            }
            // Первый кадр не должен получить dt со времени загрузки
            self.resources.last_frame = Instant::now();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                RenderSystem::resize(&mut self.resources, physical_size);
            }

            WindowEvent::Focused(false) => {
                InputSystem::release_all(&mut self.resources);
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(keycode),
                    state,
                    repeat: false,
                    ..
                },
                ..
            } => {
                if let Some(InputAction::ReleaseCursor) = InputSystem::process_keyboard(&mut self.resources, keycode, state) {
                    log::info!("[INPUT] курсор освобождён, клик чтобы вернуться");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                InputSystem::process_mouse_button(&mut self.resources, button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                InputSystem::process_mouse_wheel(&mut self.resources, delta);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            InputSystem::process_mouse_motion(&mut self.resources, delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.resources.window {
            window.request_redraw();
        }
    }
}

/// Запуск приложения
pub fn run() -> Result<(), SpaceError> {
    env_logger::init();

    println!("=== Controls ===");
    println!("Click - Capture mouse (Escape releases)");
    println!("Mouse - Yaw / pitch");
    println!("W/S - Thrust forward / back");
    println!("A/D - Strafe left / right");
    println!("R/F - Strafe up / down");
    println!("Q/E - Roll");
    println!("Left Shift - Brake");
    println!("Mouse wheel - Throttle");
    println!("Middle mouse - Toggle turbo");
    println!("================");

    let config = SpaceConfig::load_or_default(SpaceConfig::default_path())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
