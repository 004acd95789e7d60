// ============================================
// Init System - Инициализация приложения
// ============================================

use std::sync::Arc;
use winit::{dpi::LogicalSize, event_loop::ActiveEventLoop, window::Window};

use crate::space::core::{Simulation, SpaceConfig, SpaceError, SpaceResources, WINDOW_TITLE};
use crate::space::render::Renderer;

/// Система инициализации
pub struct InitSystem;

impl InitSystem {
    /// Создать ресурсы без окна (симуляция готова к первому тику)
    pub fn create_resources(config: SpaceConfig) -> Result<SpaceResources, SpaceError> {
        let simulation = Simulation::new(config)?;
        Ok(SpaceResources::new(simulation))
    }

    /// Окно + GPU
    pub fn init_window(resources: &mut SpaceResources, event_loop: &ActiveEventLoop) -> Result<(), SpaceError> {
        let config = resources.simulation.config();
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        Self::init_rendering(resources, window)
    }

    pub fn init_rendering(resources: &mut SpaceResources, window: Arc<Window>) -> Result<(), SpaceError> {
        let renderer = pollster::block_on(Renderer::new(window.clone()))?;
        let size = renderer.size();

        resources.simulation.resize(size.width, size.height);
        resources.batch.reset(size.width, size.height);
        resources.window = Some(window);
        resources.renderer = Some(renderer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_start_headless_with_populated_field() {
        let config = SpaceConfig { seed: Some(1), ..SpaceConfig::default() };
        let resources = InitSystem::create_resources(config).unwrap();
        assert!(resources.window.is_none() && resources.renderer.is_none());
        assert!(!resources.cursor_grabbed);
        assert_eq!(resources.simulation.starfield().len(), 27);
        assert_eq!(resources.window_title(), "Stardrift");
    }

    #[test]
    fn bad_config_fails_early() {
        let config = SpaceConfig { chunk_size: -1.0, ..SpaceConfig::default() };
        assert!(InitSystem::create_resources(config).is_err());
    }
}
