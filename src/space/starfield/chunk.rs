// ============================================
// Star Chunk - Куб пространства со звёздами
// ============================================

use rand::Rng;
use ultraviolet::DVec3;

use super::chunk_key::ChunkKey;

/// Звезда - неподвижная точка в мировых координатах
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: DVec3,
}

/// Чанк: фиксированный набор звёзд внутри своего куба
#[derive(Debug, Clone)]
pub struct StarChunk {
    pub key: ChunkKey,
    stars: Vec<Star>,
}

impl StarChunk {
    /// Равномерно случайные звёзды в [c*size, (c+1)*size) по каждой оси
    pub fn generate<R: Rng>(key: ChunkKey, chunk_size: f64, count: usize, rng: &mut R) -> Self {
        let [ox, oy, oz] = key.origin(chunk_size);
        let mut stars = Vec::with_capacity(count);

        for _ in 0..count {
            let position = DVec3::new(
                place_in_cell(ox, chunk_size, rng.random::<f64>()),
                place_in_cell(oy, chunk_size, rng.random::<f64>()),
                place_in_cell(oz, chunk_size, rng.random::<f64>()),
            );
            stars.push(Star { position });
        }

        Self { key, stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Лежит ли точка в полуоткрытом кубе [o, o + size)
    pub fn contains(&self, p: DVec3, chunk_size: f64) -> bool {
        let [ox, oy, oz] = self.key.origin(chunk_size);
        let inside = |v: f64, o: f64| v >= o && v < o + chunk_size;
        inside(p.x, ox) && inside(p.y, oy) && inside(p.z, oz)
    }
}

/// Координата o + r * size для r из [0, 1).
/// Округление может дать ровно o + size - тогда берётся соседнее меньшее число.
fn place_in_cell(origin: f64, size: f64, r: f64) -> f64 {
    let upper = origin + size;
    let v = origin + r * size;
    if v < upper {
        return v;
    }
    next_below(upper).max(origin)
}

/// Ближайшее f64 меньше x (x конечно)
fn next_below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generates_exact_count_inside_cube() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for key in [ChunkKey::new(0, 0, 0), ChunkKey::new(-3, 5, -1), ChunkKey::new(100, -100, 2)] {
            let chunk = StarChunk::generate(key, 4096.0, 256, &mut rng);
            assert_eq!(chunk.len(), 256);
            assert!(chunk.stars().iter().all(|s| chunk.contains(s.position, 4096.0)));
        }
    }

    #[test]
    fn rounding_never_lands_on_upper_face() {
        // 12288 + (1 - 2^-53) * 4096 округляется ровно до 16384
        let r = 1.0 - f64::EPSILON / 2.0;
        assert_eq!(12288.0 + r * 4096.0, 16384.0);

        let v = place_in_cell(12288.0, 4096.0, r);
        assert!(v < 16384.0 && v >= 12288.0);
        assert_eq!(place_in_cell(-4096.0, 4096.0, 0.0), -4096.0);
        assert!(place_in_cell(-4096.0, 4096.0, r) < 0.0);
    }

    #[test]
    fn upper_face_belongs_to_next_chunk() {
        let chunk = StarChunk::generate(ChunkKey::new(3, 0, 0), 4096.0, 0, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(chunk.contains(DVec3::new(12288.0, 0.0, 0.0), 4096.0));
        assert!(!chunk.contains(DVec3::new(16384.0, 0.0, 0.0), 4096.0));
        assert_eq!(ChunkKey::from_world_pos(16384.0, 0.0, 0.0, 4096.0).x, 4);
    }

    #[test]
    fn same_seed_same_stars() {
        let key = ChunkKey::new(1, 2, 3);
        let a = StarChunk::generate(key, 10.0, 32, &mut ChaCha8Rng::seed_from_u64(42));
        let b = StarChunk::generate(key, 10.0, 32, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn empty_chunk_is_allowed() {
        let chunk = StarChunk::generate(ChunkKey::default(), 1.0, 0, &mut ChaCha8Rng::seed_from_u64(0));
        assert!(chunk.is_empty());
    }
}
