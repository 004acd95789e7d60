// ============================================
// Projector - Перспективная проекция на экран
// ============================================
// Мир -> пространство камеры (обратный кватернион) -> экран.
// Экранный Y растёт вниз, Y камеры - вверх.

use ultraviolet::DVec3;

use crate::space::core::SpaceConfig;
use crate::space::player::CameraPose;

/// Результат проекции точки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Глубина в пространстве камеры
    pub depth: f64,
    /// Перспективный масштаб fov / depth
    pub scale: f64,
    /// depth > near_plane
    pub visible: bool,
}

/// Проектор с фиксированным fov (в пикселях)
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    pub fov: f64,
    pub near_plane: f64,
    pub depth_epsilon: f64,
    pub width: f64,
    pub height: f64,
}

impl Projector {
    pub fn new(config: &SpaceConfig) -> Self {
        Self {
            fov: config.fov,
            near_plane: config.near_plane,
            depth_epsilon: config.depth_epsilon,
            width: config.window_width as f64,
            height: config.window_height as f64,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
    }

    /// Мировая точка в пространстве камеры
    #[inline]
    pub fn to_view_space(&self, world: DVec3, pose: &CameraPose) -> DVec3 {
        pose.orientation.conjugate().rotate(world - pose.position)
    }

    pub fn project(&self, world: DVec3, pose: &CameraPose) -> ProjectedPoint {
        let view = self.to_view_space(world, pose);
        self.project_view(view)
    }

    /// Проекция точки, уже переведённой в пространство камеры
    pub fn project_view(&self, view: DVec3) -> ProjectedPoint {
        let depth = if view.z == 0.0 { self.depth_epsilon } else { view.z };
        let scale = self.fov / depth;

        ProjectedPoint {
            x: self.width * 0.5 + view.x * scale,
            y: self.height * 0.5 - view.y * scale,
            depth: view.z,
            scale,
            visible: view.z > self.near_plane,
        }
    }
}
