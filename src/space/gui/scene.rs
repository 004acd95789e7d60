// ============================================
// Scene - Звёзды и планеты на экране
// ============================================

use crate::space::core::{ProjectedPlanet, ProjectedStar};
use crate::space::render::UiBatch;

/// Базовый размер звезды (пиксели при scale = 1)
const STAR_SIZE: f64 = 2.0;
/// Ближе этого расстояния звезда рисуется кругом
const NEAR_STAR_DISTANCE: f64 = STAR_SIZE * 200.0;

/// Яркость звезды: ближе и быстрее - ярче
pub fn star_brightness(scale: f64, speed: f64) -> f32 {
    (scale * 2.0 + speed * 0.02).min(1.0) as f32
}

pub fn draw_stars(batch: &mut UiBatch, stars: &[ProjectedStar], speed: f64) {
    for star in stars {
        let p = &star.point;
        let color = [1.0, 1.0, 1.0, star_brightness(p.scale, speed)];

        if star.distance < NEAR_STAR_DISTANCE {
            let r = STAR_SIZE / 2.0 * p.scale;
            batch.disc((p.x + r) as f32, (p.y + r) as f32, r as f32, color);
        } else {
            let side = (STAR_SIZE * 0.9 * p.scale) as f32;
            batch.rect(p.x as f32, p.y as f32, side, side, color);
        }
    }
}

/// Планеты уже отсортированы от дальней к ближней
pub fn draw_planets(batch: &mut UiBatch, planets: &[ProjectedPlanet]) {
    for planet in planets {
        let p = &planet.point;
        batch.disc(p.x as f32, p.y as f32, (planet.radius * p.scale) as f32, planet.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::render::ProjectedPoint;

    fn point(x: f64, y: f64, scale: f64) -> ProjectedPoint {
        ProjectedPoint { x, y, depth: 500.0 / scale, scale, visible: true }
    }

    #[test]
    fn brightness_saturates() {
        assert!((star_brightness(0.1, 0.0) - 0.2).abs() < 1e-6);
        assert_eq!(star_brightness(0.1, 100.0), 1.0);
        assert_eq!(star_brightness(5.0, 0.0), 1.0);
    }

    #[test]
    fn far_stars_are_squares() {
        let mut batch = UiBatch::new(800, 600);
        let stars = [ProjectedStar { point: point(400.0, 300.0, 1.0), distance: 500.0 }];
        draw_stars(&mut batch, &stars, 0.0);
        assert_eq!(batch.len(), 6);
    }

    #[test]
    fn near_stars_are_discs() {
        let mut batch = UiBatch::new(800, 600);
        let stars = [ProjectedStar { point: point(400.0, 300.0, 5.0), distance: 100.0 }];
        draw_stars(&mut batch, &stars, 0.0);
        assert!(batch.len() > 6);
    }

    #[test]
    fn planet_disc_scales_with_distance() {
        let mut batch = UiBatch::new(800, 600);
        let planets = [ProjectedPlanet {
            name: "Azulon".to_string(),
            point: point(400.0, 300.0, 500.0 / 300.0),
            radius: 10.0,
            color: [0.0, 0.8, 1.0, 1.0],
            distance: 300.0,
            near: false,
        }];
        draw_planets(&mut batch, &planets);
        let max_x = batch.vertices().iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        // r = 10 * 500/300 ≈ 16.7 px -> NDC
        let expected = (400.0 + 10.0 * 500.0 / 300.0) / 800.0 * 2.0 - 1.0;
        assert!((max_x - expected as f32).abs() < 1e-3);
    }
}
