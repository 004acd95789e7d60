// ============================================
// Galaxy Backdrop - Спиральная галактика в гироскопе
// ============================================
// Строится один раз при создании симуляции, дальше только вращается.

use std::f64::consts::TAU;

use rand::Rng;
use ultraviolet::DVec3;

use crate::space::math::Quat;
use crate::space::render::UiBatch;

const STAR_COLOR: [f32; 4] = [0.769, 0.769, 0.769, 0.04];

/// Параметры спирали
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyParams {
    pub arms: usize,
    pub turns: f64,
    pub stars_per_arm: usize,
    pub inner_radius: f64,
    pub expansion: f64,
    pub star_spread: f64,
    /// Масштаб относительно длины оси гироскопа
    pub scale: f64,
    pub star_size: f32,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            arms: 2,
            turns: 1.6,
            stars_per_arm: 256,
            inner_radius: -0.8,
            expansion: 0.8,
            star_spread: 1.2,
            scale: 0.12,
            star_size: 1.2,
        }
    }
}

/// Точки галактики в плоскости XZ
pub struct GalaxyBackdrop {
    params: GalaxyParams,
    points: Vec<[f64; 2]>,
}

impl GalaxyBackdrop {
    pub fn generate<R: Rng>(params: GalaxyParams, rng: &mut R) -> Self {
        let max_angle = params.turns * TAU;
        let mut points = Vec::with_capacity(params.arms * params.stars_per_arm);

        for arm in 0..params.arms {
            let base_angle = arm as f64 / params.arms as f64 * TAU;
            for _ in 0..params.stars_per_arm {
                let t = rng.random::<f64>() * max_angle;
                let spread = params.star_spread * (1.0 - t / max_angle);
                let r = params.inner_radius
                    + params.expansion * t
                    + (rng.random::<f64>() * 2.0 - 1.0) * spread;
                let angle = t + base_angle;
                points.push([angle.cos() * r, angle.sin() * r]);
            }
        }

        Self { params, points }
    }

    pub fn empty() -> Self {
        Self { params: GalaxyParams::default(), points: Vec::new() }
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn draw(&self, batch: &mut UiBatch, cx: f32, cy: f32, axis_len: f32, orientation: Quat) {
        let inv = orientation.conjugate();
        let k = axis_len as f64 * self.params.scale;
        for &[xw, zw] in &self.points {
            let d = inv.rotate(DVec3::new(xw, 0.0, zw));
            let px = cx + (d.x * k) as f32;
            let py = cy - (d.y * k) as f32;
            batch.disc(px, py, self.params.star_size, STAR_COLOR);
        }
    }
}
