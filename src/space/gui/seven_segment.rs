// ============================================
// Seven Segment - Цифры HUD без шрифтов
// ============================================
// Числа рисуются прямоугольниками 7-сегментного индикатора.
// Поддерживаются 0-9, '-', '.', пробел; остальное пропускается.

use crate::space::render::UiBatch;

/// Выравнивание строки относительно точки привязки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

//  AAA
// F   B
//  GGG
// E   C
//  DDD
const DIGIT_SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],     // 0
    [false, true, true, false, false, false, false], // 1
    [true, true, false, true, true, false, true],    // 2
    [true, true, true, true, false, false, true],    // 3
    [false, true, true, false, false, true, true],   // 4
    [true, false, true, true, false, true, true],    // 5
    [true, false, true, true, true, true, true],     // 6
    [true, true, true, false, false, false, false],  // 7
    [true, true, true, true, true, true, true],      // 8
    [true, true, true, true, false, true, true],     // 9
];

const MINUS_SEGMENTS: [bool; 7] = [false, false, false, false, false, false, true];

/// Пропорции символа относительно высоты
const DIGIT_WIDTH: f32 = 0.55;
const THICKNESS: f32 = 0.12;
const SPACING: f32 = 0.18;

fn segments_for(ch: char) -> Option<[bool; 7]> {
    match ch {
        '0'..='9' => ch.to_digit(10).map(|d| DIGIT_SEGMENTS[d as usize]),
        '-' => Some(MINUS_SEGMENTS),
        _ => None,
    }
}

/// Ширина символа (без межсимвольного интервала)
fn glyph_width(ch: char, height: f32) -> f32 {
    match ch {
        '.' => height * THICKNESS * 1.5,
        ' ' => height * DIGIT_WIDTH * 0.5,
        c if segments_for(c).is_some() => height * DIGIT_WIDTH,
        _ => 0.0,
    }
}

/// Ширина строки в пикселях
pub fn text_width(text: &str, height: f32) -> f32 {
    let mut width = 0.0;
    let mut count = 0;
    for ch in text.chars() {
        let w = glyph_width(ch, height);
        if w > 0.0 {
            width += w;
            count += 1;
        }
    }
    if count > 1 {
        width += (count - 1) as f32 * height * SPACING;
    }
    width
}

/// Нарисовать строку; `top` - верхний край цифр
pub fn draw_text(
    batch: &mut UiBatch,
    text: &str,
    x: f32,
    top: f32,
    height: f32,
    color: [f32; 4],
    align: TextAlign,
) {
    let width = text_width(text, height);
    let mut cursor = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width * 0.5,
        TextAlign::Right => x - width,
    };

    for ch in text.chars() {
        let w = glyph_width(ch, height);
        if w <= 0.0 {
            continue;
        }
        if ch == '.' {
            let t = height * THICKNESS;
            batch.rect(cursor + (w - t) * 0.5, top + height - t, t, t, color);
        } else if let Some(segments) = segments_for(ch) {
            draw_glyph(batch, &segments, cursor, top, w, height, color);
        }
        cursor += w + height * SPACING;
    }
}

fn draw_glyph(batch: &mut UiBatch, seg: &[bool; 7], x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let t = h * THICKNESS;
    let half_h = h * 0.5;

    // A
    if seg[0] {
        batch.rect(x, y, w, t, color);
    }
    // B
    if seg[1] {
        batch.rect(x + w - t, y + t, t, half_h - t, color);
    }
    // C
    if seg[2] {
        batch.rect(x + w - t, y + half_h, t, half_h - t, color);
    }
    // D
    if seg[3] {
        batch.rect(x, y + h - t, w, t, color);
    }
    // E
    if seg[4] {
        batch.rect(x, y + half_h, t, half_h - t, color);
    }
    // F
    if seg[5] {
        batch.rect(x, y + t, t, half_h - t, color);
    }
    // G
    if seg[6] {
        batch.rect(x, y + half_h - t * 0.5, w, t, color);
    }
}
