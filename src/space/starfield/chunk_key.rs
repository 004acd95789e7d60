// ============================================
// Chunk Key - Идентификатор чанка
// ============================================

/// Ключ чанка: целочисленные координаты куба со стороной chunk_size
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ChunkKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl ChunkKey {
    #[inline]
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Из мировых координат: floor(coord / chunk_size).
    /// i64 хватает с запасом: f64 теряет дробную часть позиции раньше, чем индекс упрётся в предел.
    #[inline]
    pub fn from_world_pos(x: f64, y: f64, z: f64, chunk_size: f64) -> Self {
        Self {
            x: (x / chunk_size).floor() as i64,
            y: (y / chunk_size).floor() as i64,
            z: (z / chunk_size).floor() as i64,
        }
    }

    #[inline]
    pub fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    /// Расстояние Чебышёва (максимум по осям)
    pub fn chebyshev(&self, other: &ChunkKey) -> u64 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    /// Окрестность 3x3x3 вокруг ключа (27 штук, включая сам ключ)
    pub fn neighborhood(self) -> impl Iterator<Item = ChunkKey> {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| self.offset(dx, dy, dz)))
        })
    }

    /// Минимальный угол куба в мировых координатах
    pub fn origin(&self, chunk_size: f64) -> [f64; 3] {
        [
            self.x as f64 * chunk_size,
            self.y as f64 * chunk_size,
            self.z as f64 * chunk_size,
        ]
    }
}
