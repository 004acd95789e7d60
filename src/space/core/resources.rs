// ============================================
// Resources - Общие ресурсы приложения
// ============================================

use std::sync::Arc;
use std::time::Instant;
use winit::window::Window;

use crate::space::render::{Renderer, UiBatch};
use super::simulation::Simulation;

/// Заголовок окна без планеты
pub const WINDOW_TITLE: &str = "Stardrift";

/// Всё состояние приложения в одном месте
pub struct SpaceResources {
    // Window & Rendering
    pub window: Option<Arc<Window>>,
    pub renderer: Option<Renderer>,
    pub batch: UiBatch,

    // Мир
    pub simulation: Simulation,

    // Timing
    pub last_frame: Instant,

    // Input state
    pub cursor_grabbed: bool,

    /// Планета, имя которой сейчас в заголовке
    pub near_planet: Option<String>,
}

impl SpaceResources {
    pub fn new(simulation: Simulation) -> Self {
        let config = simulation.config();
        let batch = UiBatch::new(config.window_width, config.window_height);
        Self {
            window: None,
            renderer: None,
            batch,
            simulation,
            last_frame: Instant::now(),
            cursor_grabbed: false,
            near_planet: None,
        }
    }

    /// Заголовок окна для текущей планеты
    pub fn window_title(&self) -> String {
        match &self.near_planet {
            Some(name) => format!("{} - {}", WINDOW_TITLE, name),
            None => WINDOW_TITLE.to_string(),
        }
    }
}
