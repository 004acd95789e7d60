// ============================================
// Update System - Тик симуляции
// ============================================

use crate::space::core::{FrameOutput, SpaceResources};

/// Система обновления
pub struct UpdateSystem;

impl UpdateSystem {
    /// Основной цикл обновления
    pub fn update(resources: &mut SpaceResources, dt: f64) -> FrameOutput {
        // 1. Камера, чанки, проекция
        let frame = resources.simulation.tick(dt);

        // 2. Имя ближайшей планеты в заголовке
        Self::update_planet_label(resources, &frame);

        frame
    }

    fn update_planet_label(resources: &mut SpaceResources, frame: &FrameOutput) {
        if resources.near_planet == frame.near_planet {
            return;
        }

        match &frame.near_planet {
            Some(name) => log::info!("[HUD] рядом планета {}", name),
            None => log::debug!("[HUD] планета позади"),
        }
        resources.near_planet = frame.near_planet.clone();

        if let Some(window) = &resources.window {
            window.set_title(&resources.window_title());
        }
    }
}
