// ============================================
// Render System - Система рендеринга
// ============================================

use winit::dpi::PhysicalSize;

use crate::space::core::{FrameOutput, SpaceError, SpaceResources};
use crate::space::gui::Hud;

/// Система рендеринга
pub struct RenderSystem;

impl RenderSystem {
    /// Собрать геометрию кадра (звёзды, планеты, HUD)
    pub fn build_frame(resources: &mut SpaceResources, frame: &FrameOutput) {
        let (width, height) = match &resources.renderer {
            Some(renderer) => (renderer.size().width, renderer.size().height),
            None => {
                let projector = resources.simulation.projector();
                (projector.width as u32, projector.height as u32)
            }
        };

        resources.batch.reset(width, height);
        Hud::draw(&mut resources.batch, frame, resources.simulation.galaxy());
    }

    /// Основной рендер-пасс
    pub fn render(resources: &mut SpaceResources, frame: &FrameOutput) -> Result<(), SpaceError> {
        Self::build_frame(resources, frame);

        let Some(renderer) = &mut resources.renderer else { return Ok(()) };
        match renderer.render(&resources.batch) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[RENDER] surface потерян, переконфигурация");
                renderer.reconfigure();
                Ok(())
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[RENDER] таймаут получения кадра");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn resize(resources: &mut SpaceResources, size: PhysicalSize<u32>) {
        if let Some(renderer) = &mut resources.renderer {
            renderer.resize(size);
        }
        resources.simulation.resize(size.width, size.height);
        log::debug!("[RENDER] размер {}x{}", size.width, size.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::core::SpaceConfig;
    use crate::space::systems::{InitSystem, UpdateSystem};

    #[test]
    fn headless_frame_builds_geometry() {
        let mut r = InitSystem::create_resources(SpaceConfig { seed: Some(4), ..SpaceConfig::default() }).unwrap();
        let frame = UpdateSystem::update(&mut r, 0.016);
        RenderSystem::render(&mut r, &frame).unwrap();
        assert!(!r.batch.is_empty());
        assert_eq!((r.batch.width(), r.batch.height()), (1280.0, 720.0));
    }

    #[test]
    fn resize_reaches_projector() {
        let mut r = InitSystem::create_resources(SpaceConfig { seed: Some(4), ..SpaceConfig::default() }).unwrap();
        RenderSystem::resize(&mut r, PhysicalSize::new(800, 600));
        let frame = UpdateSystem::update(&mut r, 0.0);
        RenderSystem::build_frame(&mut r, &frame);
        assert_eq!((r.batch.width(), r.batch.height()), (800.0, 600.0));
    }
}
