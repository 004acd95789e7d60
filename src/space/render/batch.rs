// ============================================
// UI Batch - Треугольники в экранных координатах
// ============================================
// Всё 2D (звёзды, планеты, HUD) собирается в один буфер вершин.
// Координаты - пиксели (0,0 слева сверху), в NDC переводятся при добавлении.

use bytemuck::{Pod, Zeroable};

/// Вершина для UI (2D позиция в NDC + цвет)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct UiVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl UiVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<UiVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Цвет с изменённой прозрачностью
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Сборщик треугольников одного кадра
pub struct UiBatch {
    vertices: Vec<UiVertex>,
    width: f32,
    height: f32,
}

impl UiBatch {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            vertices: Vec::with_capacity(64 * 1024),
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn vertices(&self) -> &[UiVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Очистить и задать размер экрана для нового кадра
    pub fn reset(&mut self, width: u32, height: u32) {
        self.vertices.clear();
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    #[inline]
    fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        [x / self.width * 2.0 - 1.0, 1.0 - y / self.height * 2.0]
    }

    /// Треугольник в пикселях
    pub fn triangle(&mut self, a: [f32; 2], b: [f32; 2], c: [f32; 2], color: [f32; 4]) {
        if color[3] <= 0.0 {
            return;
        }
        for p in [a, b, c] {
            if !(p[0].is_finite() && p[1].is_finite()) {
                return;
            }
        }
        let a = self.to_ndc(a[0], a[1]);
        let b = self.to_ndc(b[0], b[1]);
        let c = self.to_ndc(c[0], c[1]);
        self.vertices.push(UiVertex { position: a, color });
        self.vertices.push(UiVertex { position: b, color });
        self.vertices.push(UiVertex { position: c, color });
    }

    /// Прямоугольник: левый верхний угол + размер
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        // Отсекаем полностью внеэкранные
        if x > self.width || y > self.height || x + w < 0.0 || y + h < 0.0 {
            return;
        }
        self.triangle([x, y], [x + w, y], [x + w, y + h], color);
        self.triangle([x, y], [x + w, y + h], [x, y + h], color);
    }

    /// Отрезок толщиной `thickness`
    pub fn line(&mut self, from: [f32; 2], to: [f32; 2], thickness: f32, color: [f32; 4]) {
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        let len = (dx * dx + dy * dy).sqrt();
        if len <= f32::EPSILON {
            return;
        }
        let nx = -dy / len * thickness * 0.5;
        let ny = dx / len * thickness * 0.5;

        let a = [from[0] + nx, from[1] + ny];
        let b = [to[0] + nx, to[1] + ny];
        let c = [to[0] - nx, to[1] - ny];
        let d = [from[0] - nx, from[1] - ny];
        self.triangle(a, b, c, color);
        self.triangle(a, c, d, color);
    }

    /// Закрашенный круг (веер треугольников)
    pub fn disc(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 4]) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        if cx + radius < 0.0 || cy + radius < 0.0 || cx - radius > self.width || cy - radius > self.height {
            return;
        }
        // Больше сегментов для больших кругов
        let segments = (radius.sqrt() * 4.0).clamp(8.0, 64.0) as usize;
        let step = std::f32::consts::TAU / segments as f32;
        for i in 0..segments {
            let a0 = i as f32 * step;
            let a1 = a0 + step;
            self.triangle(
                [cx, cy],
                [cx + a0.cos() * radius, cy + a0.sin() * radius],
                [cx + a1.cos() * radius, cy + a1.sin() * radius],
                color,
            );
        }
    }

    /// Сектор круга (веер от центра)
    fn pie(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32, color: [f32; 4]) {
        let segments = 4;
        let step = (end - start) / segments as f32;
        for i in 0..segments {
            let a0 = start + i as f32 * step;
            let a1 = a0 + step;
            self.triangle(
                [cx, cy],
                [cx + a0.cos() * radius, cy + a0.sin() * radius],
                [cx + a1.cos() * radius, cy + a1.sin() * radius],
                color,
            );
        }
    }

    /// Прямоугольник со скруглёнными углами
    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: [f32; 4]) {
        let r = radius.min(w * 0.5).min(h * 0.5).max(0.0);
        if r <= 0.0 {
            self.rect(x, y, w, h, color);
            return;
        }
        if x > self.width || y > self.height || x + w < 0.0 || y + h < 0.0 {
            return;
        }

        use std::f32::consts::{FRAC_PI_2, PI};
        self.rect(x + r, y, w - 2.0 * r, h, color);
        self.rect(x, y + r, r, h - 2.0 * r, color);
        self.rect(x + w - r, y + r, r, h - 2.0 * r, color);
        self.pie(x + r, y + r, r, PI, PI + FRAC_PI_2, color);
        self.pie(x + w - r, y + r, r, -FRAC_PI_2, 0.0, color);
        self.pie(x + w - r, y + h - r, r, 0.0, FRAC_PI_2, color);
        self.pie(x + r, y + h - r, r, FRAC_PI_2, PI, color);
    }

    /// Дуга окружности от `start` до `end` (радианы, по часовой на экране)
    pub fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32, thickness: f32, color: [f32; 4]) {
        let sweep = end - start;
        if sweep <= 0.0 {
            return;
        }
        let segments = ((sweep * radius / 4.0).ceil() as usize).max(2);
        let step = sweep / segments as f32;
        for i in 0..segments {
            let a0 = start + i as f32 * step;
            let a1 = a0 + step;
            self.line(
                [cx + a0.cos() * radius, cy + a0.sin() * radius],
                [cx + a1.cos() * radius, cy + a1.sin() * radius],
                thickness,
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn pixels_map_to_ndc() {
        let mut b = UiBatch::new(200, 100);
        b.triangle([0.0, 0.0], [200.0, 100.0], [100.0, 50.0], WHITE);
        let v = b.vertices();
        assert_eq!(v[0].position, [-1.0, 1.0]);
        assert_eq!(v[1].position, [1.0, -1.0]);
        assert_eq!(v[2].position, [0.0, 0.0]);
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut b = UiBatch::new(100, 100);
        b.rect(10.0, 10.0, 5.0, 5.0, WHITE);
        assert_eq!(b.len(), 6);
    }

    #[test]
    fn offscreen_and_degenerate_shapes_are_skipped() {
        let mut b = UiBatch::new(100, 100);
        b.rect(200.0, 10.0, 5.0, 5.0, WHITE);
        b.rect(10.0, 10.0, 0.0, 5.0, WHITE);
        b.disc(-50.0, 50.0, 10.0, WHITE);
        b.line([1.0, 1.0], [1.0, 1.0], 2.0, WHITE);
        b.triangle([f32::NAN, 0.0], [1.0, 1.0], [2.0, 0.0], WHITE);
        b.rect(10.0, 10.0, 5.0, 5.0, [1.0, 1.0, 1.0, 0.0]);
        assert!(b.is_empty());
    }

    #[test]
    fn line_has_requested_thickness() {
        let mut b = UiBatch::new(100, 100);
        b.line([10.0, 50.0], [90.0, 50.0], 4.0, WHITE);
        assert_eq!(b.len(), 6);
        // y = 48 и 52 в пикселях -> NDC
        let ys: Vec<f32> = b.vertices().iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().all(|&y| (y - 0.04).abs() < 1e-6 || (y + 0.04).abs() < 1e-6));
    }

    #[test]
    fn rounded_rect_falls_back_to_plain_rect() {
        let mut plain = UiBatch::new(100, 100);
        plain.rounded_rect(10.0, 10.0, 20.0, 10.0, 0.0, WHITE);
        assert_eq!(plain.len(), 6);

        let mut rounded = UiBatch::new(100, 100);
        rounded.rounded_rect(10.0, 10.0, 20.0, 10.0, 4.0, WHITE);
        // 3 прямоугольника + 4 угла по 4 треугольника
        assert_eq!(rounded.len(), 3 * 6 + 4 * 4 * 3);
    }

    #[test]
    fn reset_clears_and_resizes() {
        let mut b = UiBatch::new(100, 100);
        b.disc(50.0, 50.0, 10.0, WHITE);
        assert!(!b.is_empty());
        b.reset(400, 300);
        assert!(b.is_empty());
        assert_eq!((b.width(), b.height()), (400.0, 300.0));
    }
}
