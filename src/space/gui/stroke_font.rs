// ============================================
// Stroke Font - Векторные подписи HUD
// ============================================
// Буквы ломаными линиями в ячейке 1x1 (y вниз).
// Для названий планет и меток осей; регистр не важен.

use crate::space::render::UiBatch;
use super::seven_segment::TextAlign;

type Stroke = &'static [(f32, f32)];

/// Ширина ячейки и интервал относительно высоты
const GLYPH_WIDTH: f32 = 0.6;
const SPACING: f32 = 0.3;
const THICKNESS: f32 = 0.12;

const BOX: Stroke = &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)];

fn strokes_for(ch: char) -> Option<&'static [Stroke]> {
    let strokes: &'static [Stroke] = match ch.to_ascii_uppercase() {
        'A' => &[&[(0.0, 1.0), (0.5, 0.0), (1.0, 1.0)], &[(0.25, 0.5), (0.75, 0.5)]],
        'B' => &[
            &[(0.0, 1.0), (0.0, 0.0), (0.75, 0.0), (1.0, 0.25), (0.75, 0.5), (0.0, 0.5)],
            &[(0.75, 0.5), (1.0, 0.75), (0.75, 1.0), (0.0, 1.0)],
        ],
        'C' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]],
        'D' => &[&[(0.0, 0.0), (0.6, 0.0), (1.0, 0.4), (1.0, 0.6), (0.6, 1.0), (0.0, 1.0), (0.0, 0.0)]],
        'E' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0)], &[(0.0, 0.5), (0.7, 0.5)]],
        'F' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0)], &[(0.0, 0.5), (0.7, 0.5)]],
        'G' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.5), (0.5, 0.5)]],
        'H' => &[&[(0.0, 0.0), (0.0, 1.0)], &[(1.0, 0.0), (1.0, 1.0)], &[(0.0, 0.5), (1.0, 0.5)]],
        'I' => &[&[(0.5, 0.0), (0.5, 1.0)], &[(0.2, 0.0), (0.8, 0.0)], &[(0.2, 1.0), (0.8, 1.0)]],
        'J' => &[&[(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.7)]],
        'K' => &[&[(0.0, 0.0), (0.0, 1.0)], &[(1.0, 0.0), (0.0, 0.5), (1.0, 1.0)]],
        'L' => &[&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]],
        'M' => &[&[(0.0, 1.0), (0.0, 0.0), (0.5, 0.5), (1.0, 0.0), (1.0, 1.0)]],
        'N' => &[&[(0.0, 1.0), (0.0, 0.0), (1.0, 1.0), (1.0, 0.0)]],
        'O' => &[BOX],
        'P' => &[&[(0.0, 1.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.5), (0.0, 0.5)]],
        'Q' => &[BOX, &[(0.55, 0.55), (1.0, 1.0)]],
        'R' => &[&[(0.0, 1.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.5), (0.0, 0.5), (1.0, 1.0)]],
        'S' | '5' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 0.5), (1.0, 0.5), (1.0, 1.0), (0.0, 1.0)]],
        'T' => &[&[(0.0, 0.0), (1.0, 0.0)], &[(0.5, 0.0), (0.5, 1.0)]],
        'U' => &[&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]],
        'V' => &[&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]],
        'W' => &[&[(0.0, 0.0), (0.25, 1.0), (0.5, 0.5), (0.75, 1.0), (1.0, 0.0)]],
        'X' => &[&[(0.0, 0.0), (1.0, 1.0)], &[(1.0, 0.0), (0.0, 1.0)]],
        'Y' => &[&[(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)], &[(0.5, 0.5), (0.5, 1.0)]],
        'Z' => &[&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]],
        '0' => &[BOX, &[(1.0, 0.0), (0.0, 1.0)]],
        '1' => &[&[(0.3, 0.2), (0.5, 0.0), (0.5, 1.0)]],
        '2' => &[&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.5), (0.0, 0.5), (0.0, 1.0), (1.0, 1.0)]],
        '3' => &[&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], &[(0.3, 0.5), (1.0, 0.5)]],
        '4' => &[&[(0.0, 0.0), (0.0, 0.5), (1.0, 0.5)], &[(1.0, 0.0), (1.0, 1.0)]],
        '6' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.5), (0.0, 0.5)]],
        '7' => &[&[(0.0, 0.0), (1.0, 0.0), (0.4, 1.0)]],
        '8' => &[BOX, &[(0.0, 0.5), (1.0, 0.5)]],
        '9' => &[&[(1.0, 0.5), (0.0, 0.5), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]],
        '-' => &[&[(0.2, 0.5), (0.8, 0.5)]],
        ':' => &[&[(0.5, 0.2), (0.5, 0.35)], &[(0.5, 0.65), (0.5, 0.8)]],
        '.' => &[&[(0.5, 0.85), (0.5, 1.0)]],
        ' ' => &[],
        _ => return None,
    };
    Some(strokes)
}

/// Ширина подписи в пикселях (неизвестные символы пропускаются)
pub fn label_width(text: &str, height: f32) -> f32 {
    let count = text.chars().filter(|&c| strokes_for(c).is_some()).count();
    if count == 0 {
        return 0.0;
    }
    count as f32 * height * GLYPH_WIDTH + (count - 1) as f32 * height * SPACING
}

/// Нарисовать подпись; `top` - верхний край букв
pub fn draw_label(
    batch: &mut UiBatch,
    text: &str,
    x: f32,
    top: f32,
    height: f32,
    color: [f32; 4],
    align: TextAlign,
) {
    let width = label_width(text, height);
    let mut cursor = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width * 0.5,
        TextAlign::Right => x - width,
    };
    let glyph_w = height * GLYPH_WIDTH;
    let thickness = (height * THICKNESS).max(1.0);

    for ch in text.chars() {
        let Some(strokes) = strokes_for(ch) else {
            continue;
        };
        for stroke in strokes {
            for pair in stroke.windows(2) {
                let (ax, ay) = pair[0];
                let (bx, by) = pair[1];
                batch.line(
                    [cursor + ax * glyph_w, top + ay * height],
                    [cursor + bx * glyph_w, top + by * height],
                    thickness,
                    color,
                );
            }
        }
        cursor += glyph_w + height * SPACING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    fn vertex_count(text: &str) -> usize {
        let mut b = UiBatch::new(800, 200);
        draw_label(&mut b, text, 10.0, 10.0, 20.0, WHITE, TextAlign::Left);
        b.len()
    }

    #[test]
    fn letters_are_drawn_as_segments() {
        // X - две линии, H - три, по 6 вершин на линию
        assert_eq!(vertex_count("X"), 2 * 6);
        assert_eq!(vertex_count("H"), 3 * 6);
        assert_eq!(vertex_count("x"), vertex_count("X"));
    }

    #[test]
    fn every_planet_letter_is_known() {
        for name in ["Azulon", "Fulgor"] {
            assert!(name.chars().all(|c| strokes_for(c).is_some()), "{}", name);
            assert!(vertex_count(name) > 0);
        }
    }

    #[test]
    fn unknown_characters_are_skipped() {
        assert_eq!(label_width("#", 20.0), 0.0);
        assert_eq!(label_width("A#B", 20.0), label_width("AB", 20.0));
        assert_eq!(vertex_count("#"), 0);
    }

    #[test]
    fn centered_label_is_symmetric() {
        let mut b = UiBatch::new(800, 200);
        draw_label(&mut b, "OO", 400.0, 10.0, 20.0, WHITE, TextAlign::Center);
        let xs = b.vertices().iter().map(|v| v.position[0]);
        let (min, max) = xs.fold((f32::MAX, f32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        assert!((min + max).abs() < 1e-4);
    }
}
