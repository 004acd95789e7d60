// ============================================
// Gyroscope - Индикатор ориентации
// ============================================
// Мировые оси X/Y/Z, повёрнутые обратным кватернионом камеры.
// Рисуются от дальней к ближней (порядок художника), альфа по глубине.

use ultraviolet::DVec3;

use crate::space::math::Quat;
use crate::space::render::{with_alpha, UiBatch};
use super::galaxy::GalaxyBackdrop;

pub const AXIS_X_COLOR: [f32; 4] = [1.0, 0.333, 0.333, 1.0]; // #f55
pub const AXIS_Y_COLOR: [f32; 4] = [0.333, 1.0, 0.333, 1.0]; // #5f5
pub const AXIS_Z_COLOR: [f32; 4] = [0.333, 0.333, 1.0, 1.0]; // #55f

const GYRO_SIZE: f32 = 96.0;
const AXIS_LEN: f32 = GYRO_SIZE / 2.0;
/// Пустое место у центра (доля длины оси)
const GAP_FRACTION: f32 = 0.64;
const ARROW_OFFSET: f32 = 8.0;
const ARROW_SIZE: f32 = 6.0;
const SYMBOL_OFFSET: f32 = ARROW_OFFSET + ARROW_SIZE + 4.0;
const SYMBOL_HALF: f32 = 5.0;
const BAR_HALF: f32 = 4.0;
const LINE_WIDTH: f32 = 3.2;
const SYMBOL_LINE_WIDTH: f32 = 1.0;
const MIN_ALPHA: f64 = 0.16;
const SYMBOL_THRESHOLD: f64 = 0.9;

/// Как оформлен конец оси
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisMarker {
    /// "+" - ось почти совпадает с направлением взгляда
    Plus,
    /// Наконечник стрелки
    Arrowhead,
    /// "−" для отрицательного конца
    Minus,
    /// Короткая поперечная черта
    Bar,
}

/// Одна ось в пространстве камеры
#[derive(Debug, Clone, Copy)]
pub struct GyroAxis {
    pub dir: DVec3,
    pub color: [f32; 4],
}

impl GyroAxis {
    pub fn positive_alpha(&self) -> f64 {
        depth_alpha(self.dir.z)
    }

    pub fn negative_alpha(&self) -> f64 {
        depth_alpha(-self.dir.z)
    }

    pub fn positive_marker(&self) -> AxisMarker {
        if self.dir.z > SYMBOL_THRESHOLD {
            AxisMarker::Plus
        } else {
            AxisMarker::Arrowhead
        }
    }

    pub fn negative_marker(&self) -> AxisMarker {
        if -self.dir.z > SYMBOL_THRESHOLD {
            AxisMarker::Minus
        } else {
            AxisMarker::Bar
        }
    }
}

/// Глубина [-1, 1] -> прозрачность [MIN_ALPHA, 1]
pub fn depth_alpha(dz: f64) -> f64 {
    let t = (dz + 1.0) / 2.0;
    MIN_ALPHA + (1.0 - MIN_ALPHA) * t
}

/// Оси в порядке отрисовки (по возрастанию z)
pub fn gyro_axes(orientation: Quat) -> [GyroAxis; 3] {
    let inv = orientation.conjugate();
    let mut axes = [
        GyroAxis { dir: inv.rotate(DVec3::unit_x()), color: AXIS_X_COLOR },
        GyroAxis { dir: inv.rotate(DVec3::unit_y()), color: AXIS_Y_COLOR },
        GyroAxis { dir: inv.rotate(DVec3::unit_z()), color: AXIS_Z_COLOR },
    ];
    axes.sort_by(|a, b| a.dir.z.total_cmp(&b.dir.z));
    axes
}

pub struct Gyroscope;

impl Gyroscope {
    /// Центр индикатора на экране
    pub fn center(screen_width: f32) -> [f32; 2] {
        [screen_width / 2.0, GYRO_SIZE]
    }

    pub fn draw(batch: &mut UiBatch, orientation: Quat, galaxy: &GalaxyBackdrop) {
        let [cx, cy] = Self::center(batch.width());
        galaxy.draw(batch, cx, cy, AXIS_LEN, orientation);

        for axis in gyro_axes(orientation) {
            Self::draw_axis(batch, cx, cy, &axis);
        }
    }

    fn draw_axis(batch: &mut UiBatch, cx: f32, cy: f32, axis: &GyroAxis) {
        // Экранный Y вниз
        let dx = axis.dir.x as f32;
        let dy = -axis.dir.y as f32;
        let a_pos = axis.positive_alpha() as f32;
        let a_neg = axis.negative_alpha() as f32;
        let gap = AXIS_LEN * GAP_FRACTION;

        let pos = [cx + dx * AXIS_LEN, cy + dy * AXIS_LEN];
        let neg = [cx - dx * AXIS_LEN, cy - dy * AXIS_LEN];

        batch.line([cx - dx * gap, cy - dy * gap], neg, LINE_WIDTH, with_alpha(axis.color, a_neg));
        batch.line([cx + dx * gap, cy + dy * gap], pos, LINE_WIDTH, with_alpha(axis.color, a_pos));

        let (perp_x, perp_y) = (-dy, dx);

        match axis.positive_marker() {
            AxisMarker::Plus => {
                let x = pos[0] + dx * SYMBOL_OFFSET;
                let y = pos[1] + dy * SYMBOL_OFFSET;
                batch.line([x - SYMBOL_HALF, y], [x + SYMBOL_HALF, y], SYMBOL_LINE_WIDTH, axis.color);
                batch.line([x, y - SYMBOL_HALF], [x, y + SYMBOL_HALF], SYMBOL_LINE_WIDTH, axis.color);
            }
            _ => {
                let color = with_alpha(axis.color, a_pos);
                let px = pos[0] + dx * ARROW_OFFSET;
                let py = pos[1] + dy * ARROW_OFFSET;
                let tip = [px + dx * ARROW_SIZE, py + dy * ARROW_SIZE];
                let left = [px + perp_x * ARROW_SIZE, py + perp_y * ARROW_SIZE];
                let right = [px - perp_x * ARROW_SIZE, py - perp_y * ARROW_SIZE];
                batch.line(left, tip, LINE_WIDTH, color);
                batch.line(tip, right, LINE_WIDTH, color);
            }
        }

        match axis.negative_marker() {
            AxisMarker::Minus => {
                let x = neg[0] - dx * SYMBOL_OFFSET;
                let y = neg[1] - dy * SYMBOL_OFFSET;
                batch.line([x - SYMBOL_HALF, y], [x + SYMBOL_HALF, y], SYMBOL_LINE_WIDTH, axis.color);
            }
            _ => {
                let px = neg[0] - dx * ARROW_OFFSET;
                let py = neg[1] - dy * ARROW_OFFSET;
                batch.line(
                    [px + perp_x * BAR_HALF, py + perp_y * BAR_HALF],
                    [px - perp_x * BAR_HALF, py - perp_y * BAR_HALF],
                    LINE_WIDTH,
                    with_alpha(axis.color, a_neg),
                );
            }
        }
    }
}
