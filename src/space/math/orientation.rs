// ============================================
// Orientation - Общий контракт ориентации камеры
// ============================================
// Две взаимозаменяемые реализации:
// - Quat (основная, без gimbal lock)
// - EulerAngles (yaw/pitch/roll, порядок Y-X-Z)

use ultraviolet::DVec3;
use super::quaternion::Quat;

/// Ориентация в пространстве
pub trait Orientation: Copy + std::fmt::Debug {
    fn identity() -> Self;

    /// Эквивалентный единичный кватернион
    fn to_quat(&self) -> Quat;

    fn from_quat(q: Quat) -> Self;

    /// Локальный вектор -> мировой
    fn rotate(&self, v: DVec3) -> DVec3 {
        self.to_quat().rotate(v)
    }

    /// Мировой вектор -> локальный (обратный поворот)
    fn unrotate(&self, v: DVec3) -> DVec3 {
        self.to_quat().conjugate().rotate(v)
    }

    /// Применить приращение слева: new = incremental * old, с ренормализацией
    fn compose(&self, incremental: Quat) -> Self {
        Self::from_quat((incremental * self.to_quat()).normalized())
    }

    /// Поворот вокруг мировой оси
    fn turned(&self, axis: DVec3, angle: f64) -> Self {
        self.compose(Quat::from_axis_angle(axis, angle))
    }
}

impl Orientation for Quat {
    fn identity() -> Self {
        Quat::IDENTITY
    }

    fn to_quat(&self) -> Quat {
        *self
    }

    fn from_quat(q: Quat) -> Self {
        q
    }

    fn rotate(&self, v: DVec3) -> DVec3 {
        Quat::rotate(self, v)
    }

    fn unrotate(&self, v: DVec3) -> DVec3 {
        self.conjugate().rotate(v)
    }
}

/// Углы Эйлера в порядке Y (yaw) -> X (pitch) -> Z (roll)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl EulerAngles {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }
}

impl Orientation for EulerAngles {
    fn identity() -> Self {
        Self::default()
    }

    fn to_quat(&self) -> Quat {
        let yaw = Quat::from_axis_angle(DVec3::unit_y(), self.yaw);
        let pitch = Quat::from_axis_angle(DVec3::unit_x(), self.pitch);
        let roll = Quat::from_axis_angle(DVec3::unit_z(), self.roll);
        (yaw * pitch * roll).normalized()
    }

    fn from_quat(q: Quat) -> Self {
        // Элементы матрицы поворота R = Ry * Rx * Rz через базисные векторы
        let right = q.right();
        let up = q.up();
        let forward = q.forward();

        let pitch = (-forward.y).clamp(-1.0, 1.0).asin();
        let yaw = forward.x.atan2(forward.z);
        let roll = right.y.atan2(up.y);

        Self { yaw, pitch, roll }
    }
}
