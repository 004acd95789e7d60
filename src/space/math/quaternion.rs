// ============================================
// Quaternion - Кватернион поворота
// ============================================
// Компоненты (x, y, z, w), w - скалярная часть.
// Композиция некоммутативна: `a * b` - сначала b, потом a.

use std::ops::Mul;
use ultraviolet::DVec3;

/// Кватернион поворота (единичный по соглашению)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Поворот на `angle` радиан вокруг `axis`.
    /// Ось нормализуется здесь же, чтобы ошибка округления не копилась.
    pub fn from_axis_angle(axis: DVec3, angle: f64) -> Self {
        let len = axis.mag();
        if len == 0.0 || !len.is_finite() {
            return Self::IDENTITY;
        }
        let axis = axis / len;
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Произведение Гамильтона: результат = "повернуть на `b`, затем на `self`"
    pub fn multiply(self, b: Quat) -> Quat {
        let a = self;
        Quat::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    /// Евклидова норма 4 компонент
    #[inline]
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Нормализация. Нулевая норма делится на 1 (без NaN).
    pub fn normalized(self) -> Quat {
        let n = self.norm();
        let len = if n == 0.0 { 1.0 } else { n };
        Quat::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Обратный поворот (для единичного кватерниона)
    #[inline]
    pub fn conjugate(self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Векторная часть
    #[inline]
    pub fn xyz(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Повернуть вектор без перехода к матрице:
    /// t = 2 (q.xyz × v), v' = v + w t + q.xyz × t
    pub fn rotate(&self, v: DVec3) -> DVec3 {
        let u = self.xyz();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Векторы камеры в мировых координатах
    #[inline]
    pub fn right(&self) -> DVec3 {
        self.rotate(DVec3::unit_x())
    }

    #[inline]
    pub fn up(&self) -> DVec3 {
        self.rotate(DVec3::unit_y())
    }

    #[inline]
    pub fn forward(&self) -> DVec3 {
        self.rotate(DVec3::unit_z())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Quat;

    #[inline]
    fn mul(self, rhs: Quat) -> Quat {
        self.multiply(rhs)
    }
}
