// ============================================
// Ship - Свободная камера (корабль)
// ============================================
// Позиция, ориентация, скорость. Мутируется один раз за тик.

use ultraviolet::DVec3;
use crate::space::math::{Orientation, Quat};

/// Камера-корабль. По умолчанию ориентация - кватернион.
#[derive(Debug, Clone, Copy)]
pub struct Ship<O: Orientation = Quat> {
    /// Позиция в мировых единицах
    pub position: DVec3,

    /// Ориентация (локальная система -> мировая)
    pub orientation: O,

    /// Скорость (мировые единицы/с)
    pub velocity: DVec3,

    /// |velocity|, пересчитывается после интегрирования
    pub speed: f64,
}

impl<O: Orientation> Ship<O> {
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            orientation: O::identity(),
            velocity: DVec3::zero(),
            speed: 0.0,
        }
    }

    /// Явный Эйлер: позиция += скорость * dt
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        self.speed = self.velocity.mag();
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            orientation: self.orientation.to_quat(),
            speed: self.speed,
        }
    }
}

impl<O: Orientation> Default for Ship<O> {
    fn default() -> Self {
        Self::new(DVec3::zero())
    }
}

/// Поза камеры за кадр (для проектора и HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub orientation: Quat,
    pub speed: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: DVec3::zero(),
            orientation: Quat::IDENTITY,
            speed: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::math::EulerAngles;

    #[test]
    fn integrate_moves_and_updates_speed() {
        let mut ship: Ship = Ship::new(DVec3::new(1.0, 2.0, 3.0));
        ship.velocity = DVec3::new(3.0, 0.0, 4.0);
        ship.integrate(0.5);
        assert_eq!(ship.position, DVec3::new(2.5, 2.0, 5.0));
        assert_eq!(ship.speed, 5.0);
    }

    #[test]
    fn euler_ship_reports_quaternion_pose() {
        let mut ship: Ship<EulerAngles> = Ship::default();
        ship.orientation = EulerAngles::new(0.5, 0.0, 0.0);
        let pose = ship.pose();
        let expected = ship.orientation.to_quat();
        assert_eq!(pose.orientation, expected);
        assert!((pose.orientation.norm() - 1.0).abs() < 1e-12);
    }
}
