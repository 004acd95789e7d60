// ============================================
// HUD - Приборная панель
// ============================================
// Координаты (справа сверху), скорость и шкала мощности (снизу),
// прицел (центр), гироскоп (сверху по центру).

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::space::core::FrameOutput;
use crate::space::player::ThrottleState;
use crate::space::render::UiBatch;
use super::galaxy::GalaxyBackdrop;
use super::gyroscope::{Gyroscope, AXIS_X_COLOR, AXIS_Y_COLOR, AXIS_Z_COLOR};
use super::scene;
use super::seven_segment::{draw_text, TextAlign};
use super::stroke_font::{draw_label, label_width};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BRAKE_COLOR: [f32; 4] = [1.0, 0.333, 0.333, 1.0]; // #f55
const THROTTLE_NORMAL: [f32; 4] = [0.0, 0.6, 1.0, 1.0]; // #09f
const THROTTLE_TURBO: [f32; 4] = [1.0, 0.6, 0.0, 1.0]; // #f90
const RETICLE_COLOR: [f32; 4] = [0.498, 0.498, 0.498, 0.48];

// Координаты
const COORD_MARGIN: f32 = 10.0;
const COORD_LINE_STEP: f32 = 20.0;
const COORD_HEIGHT: f32 = 14.0 * 0.7;
const COORD_LABEL_GAP: f32 = 6.0;

// Название планеты
const PLANET_NAME_HEIGHT: f32 = 20.0 * 0.7;
const PLANET_NAME_Y: f32 = 0.2;

// Скорость
const SPEED_FONT: f32 = 96.0;
const SPEED_BASELINE_OFFSET: f32 = 72.0;
const BRAKE_MARKER_OFFSET: f32 = 192.0;
const BRAKE_MARKER_RADIUS: f32 = 8.0;

// Шкала мощности
const BAR_WIDTH: f32 = 512.0;
const BAR_HEIGHT: f32 = 32.0;
const BAR_GAP: f32 = 8.0;
const BAR_BOTTOM: f32 = 16.0;
const BAR_RADIUS: f32 = 4.0;

// Прицел
const RETICLE_RADIUS: f32 = 24.0;
const RETICLE_SEGMENTS: usize = 3;
const RETICLE_GAP: f32 = 0.64;
const RETICLE_WIDTH: f32 = 4.8;
const RETICLE_TICK: f32 = 12.0;

/// Прямоугольник сегмента шкалы (x, y, w, h)
pub type BarRect = (f32, f32, f32, f32);

/// Раскладка шкалы мощности: горящие сегменты или два маркера по краям
pub fn throttle_layout(state: &ThrottleState, screen_w: f32, screen_h: f32) -> Vec<BarRect> {
    let total = state.total_segments();
    let lit = state.lit_segments().min(total);
    let x0 = (screen_w - BAR_WIDTH) / 2.0;
    let y0 = screen_h - BAR_BOTTOM - BAR_HEIGHT;

    if lit == 0 {
        let marker_w = BAR_HEIGHT / 4.0;
        return vec![
            (x0, y0, marker_w, BAR_HEIGHT),
            (x0 + BAR_WIDTH - marker_w, y0, marker_w, BAR_HEIGHT),
        ];
    }

    let seg_w = (BAR_WIDTH - BAR_GAP * (total as f32 - 1.0)) / total as f32;
    (0..lit)
        .map(|i| (x0 + i as f32 * (seg_w + BAR_GAP), y0, seg_w, BAR_HEIGHT))
        .collect()
}

/// Скорость для отображения (целые, без "-0")
pub fn format_speed(speed: f64) -> String {
    let rounded = speed.round();
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

pub struct Hud;

impl Hud {
    /// Полный кадр: сцена, затем приборы поверх
    pub fn draw(batch: &mut UiBatch, frame: &FrameOutput, galaxy: &GalaxyBackdrop) {
        scene::draw_stars(batch, &frame.stars, frame.pose.speed);
        scene::draw_planets(batch, &frame.planets);
        Self::draw_planet_name(batch, frame.near_planet.as_deref());

        Self::draw_coordinates(batch, frame);
        Self::draw_speed(batch, frame.pose.speed, frame.braking);
        Self::draw_throttle(batch, &frame.throttle);
        Self::draw_reticle(batch);
        Gyroscope::draw(batch, frame.pose.orientation, galaxy);
    }

    fn draw_coordinates(batch: &mut UiBatch, frame: &FrameOutput) {
        let right = batch.width() - COORD_MARGIN;
        let p = frame.pose.position;
        let rows = [(p.x, AXIS_X_COLOR), (p.y, AXIS_Y_COLOR), (p.z, AXIS_Z_COLOR)];

        let labels = [":X", ":Y", ":Z"];

        for (i, ((value, color), label)) in rows.into_iter().zip(labels).enumerate() {
            let top = COORD_MARGIN + i as f32 * COORD_LINE_STEP;
            draw_label(batch, label, right, top, COORD_HEIGHT, color, TextAlign::Right);
            let digits_right = right - label_width(label, COORD_HEIGHT) - COORD_LABEL_GAP;
            draw_text(batch, &format!("{:.1}", value), digits_right, top, COORD_HEIGHT, color, TextAlign::Right);
        }
    }

    /// Имя планеты по центру на 20% высоты, пока камера рядом
    fn draw_planet_name(batch: &mut UiBatch, name: Option<&str>) {
        let Some(name) = name else {
            return;
        };
        let top = batch.height() * PLANET_NAME_Y - PLANET_NAME_HEIGHT;
        draw_label(batch, name, batch.width() / 2.0, top, PLANET_NAME_HEIGHT, WHITE, TextAlign::Center);
    }

    fn draw_speed(batch: &mut UiBatch, speed: f64, braking: bool) {
        let center_x = batch.width() / 2.0;
        let baseline = batch.height() - SPEED_BASELINE_OFFSET;
        let digit_h = SPEED_FONT * 0.7;
        let color = if braking { BRAKE_COLOR } else { WHITE };

        draw_text(batch, &format_speed(speed), center_x, baseline - digit_h, digit_h, color, TextAlign::Center);

        if braking {
            let rect_h = SPEED_FONT * 0.8;
            let rect_w = rect_h / 2.0;
            let rect_y = baseline - digit_h;
            for x in [center_x - BRAKE_MARKER_OFFSET - rect_w, center_x + BRAKE_MARKER_OFFSET] {
                batch.rounded_rect(x, rect_y, rect_w, rect_h, BRAKE_MARKER_RADIUS, BRAKE_COLOR);
            }
        }
    }

    fn draw_throttle(batch: &mut UiBatch, state: &ThrottleState) {
        let color = if state.is_turbo() { THROTTLE_TURBO } else { THROTTLE_NORMAL };
        for (x, y, w, h) in throttle_layout(state, batch.width(), batch.height()) {
            batch.rounded_rect(x, y, w, h, BAR_RADIUS, color);
        }
    }

    /// Три дуги с засечками к центру, первая начинается снизу
    fn draw_reticle(batch: &mut UiBatch) {
        let cx = batch.width() / 2.0;
        let cy = batch.height() / 2.0;
        let part = TAU / RETICLE_SEGMENTS as f32;

        for i in 0..RETICLE_SEGMENTS {
            let start = FRAC_PI_2 + i as f32 * part + RETICLE_GAP / 2.0;
            let end = FRAC_PI_2 + (i + 1) as f32 * part - RETICLE_GAP / 2.0;
            let mid = FRAC_PI_2 + (i as f32 + 0.5) * part;

            batch.arc(cx, cy, RETICLE_RADIUS, start, end, RETICLE_WIDTH, RETICLE_COLOR);
            batch.line(
                [cx + mid.cos() * RETICLE_RADIUS, cy + mid.sin() * RETICLE_RADIUS],
                [cx + mid.cos() * (RETICLE_RADIUS - RETICLE_TICK), cy + mid.sin() * (RETICLE_RADIUS - RETICLE_TICK)],
                RETICLE_WIDTH,
                RETICLE_COLOR,
            );
        }
    }
}
