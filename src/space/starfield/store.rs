// ============================================
// Chunk Store - Стриминг чанков вокруг камеры
// ============================================
// Окрестность 3x3x3 чанков вокруг текущего чанка камеры.
// Недостающие создаются (параллельно), дальние выгружаются.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use ultraviolet::DVec3;

use crate::space::core::SpaceConfig;
use super::chunk::{Star, StarChunk};
use super::chunk_key::ChunkKey;

/// Максимум одновременно загруженных чанков
pub const MAX_RESIDENT_CHUNKS: usize = 27;

/// Разреженное хранилище чанков
pub struct ChunkStore {
    chunks: HashMap<ChunkKey, StarChunk>,
    chunk_size: f64,
    stars_per_chunk: usize,
    rng: ChaCha8Rng,
    center: Option<ChunkKey>,
}

impl ChunkStore {
    pub fn new(config: &SpaceConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("[CHUNKS] seed = {}", seed);
        Self::with_seed(config.chunk_size, config.stars_per_chunk, seed)
    }

    pub fn with_seed(chunk_size: f64, stars_per_chunk: usize, seed: u64) -> Self {
        Self {
            chunks: HashMap::with_capacity(MAX_RESIDENT_CHUNKS * 2),
            chunk_size,
            stars_per_chunk,
            rng: ChaCha8Rng::seed_from_u64(seed),
            center: None,
        }
    }

    pub fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    pub fn stars_per_chunk(&self) -> usize {
        self.stars_per_chunk
    }

    /// Чанк, в котором находится точка
    pub fn key_for(&self, position: DVec3) -> ChunkKey {
        ChunkKey::from_world_pos(position.x, position.y, position.z, self.chunk_size)
    }

    /// Чанк камеры на момент последнего update
    pub fn center(&self) -> Option<ChunkKey> {
        self.center
    }

    /// Создать все отсутствующие чанки окрестности. Возвращает число созданных.
    pub fn ensure_neighborhood(&mut self, center: ChunkKey) -> usize {
        // Сиды раздаются последовательно - результат не зависит от числа потоков
        let missing: Vec<(ChunkKey, u64)> = center
            .neighborhood()
            .filter(|key| !self.chunks.contains_key(key))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|key| (key, self.rng.random::<u64>()))
            .collect();

        if missing.is_empty() {
            return 0;
        }

        let chunk_size = self.chunk_size;
        let count = self.stars_per_chunk;
        let generated: Vec<StarChunk> = missing
            .par_iter()
            .map(|&(key, seed)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                StarChunk::generate(key, chunk_size, count, &mut rng)
            })
            .collect();

        let created = generated.len();
        for chunk in generated {
            self.chunks.insert(chunk.key, chunk);
        }
        created
    }

    /// Выгрузить чанки дальше 1 по Чебышёву. Возвращает число выгруженных.
    pub fn evict_out_of_range(&mut self, center: ChunkKey) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|key, _| key.chebyshev(&center) <= 1);
        before - self.chunks.len()
    }

    /// Обслуживание за тик: создать, затем выгрузить
    pub fn update(&mut self, camera_position: DVec3) -> ChunkKey {
        let center = self.key_for(camera_position);
        let created = self.ensure_neighborhood(center);
        let evicted = self.evict_out_of_range(center);

        if created > 0 || evicted > 0 {
            log::debug!(
                "[CHUNKS] центр {:?}: создано {}, выгружено {}, всего {}",
                center, created, evicted, self.chunks.len()
            );
        }

        self.center = Some(center);
        center
    }

    pub fn get(&self, key: &ChunkKey) -> Option<&StarChunk> {
        self.chunks.get(key)
    }

    pub fn contains(&self, key: &ChunkKey) -> bool {
        self.chunks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ChunkKey> {
        self.chunks.keys()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &StarChunk> {
        self.chunks.values()
    }

    /// Все загруженные звёзды
    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.chunks.values().flat_map(|c| c.stars().iter())
    }

    pub fn star_count(&self) -> usize {
        self.chunks.values().map(StarChunk::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store() -> ChunkStore {
        ChunkStore::with_seed(4096.0, 256, 1234)
    }

    fn expected_keys(center: ChunkKey) -> HashSet<ChunkKey> {
        center.neighborhood().collect()
    }

    #[test]
    fn resident_set_is_exactly_the_neighborhood() {
        let mut s = store();
        let center = s.update(DVec3::zero());
        let keys: HashSet<ChunkKey> = s.keys().copied().collect();
        assert_eq!(keys, expected_keys(center));
        assert_eq!(s.len(), MAX_RESIDENT_CHUNKS);
    }

    #[test]
    fn camera_at_5000_spans_x_0_to_2() {
        let mut s = store();
        let center = s.update(DVec3::new(5000.0, 0.0, 0.0));
        assert_eq!(center, ChunkKey::new(1, 0, 0));

        let xs: HashSet<i64> = s.keys().map(|k| k.x).collect();
        assert_eq!(xs, [0, 1, 2].into_iter().collect());
    }

    #[test]
    fn moving_evicts_stragglers_and_fills_gaps() {
        let mut s = store();
        s.update(DVec3::zero());
        let center = s.update(DVec3::new(s.chunk_size() * 1.5, -10.0, 0.0));
        assert_eq!(center, ChunkKey::new(1, -1, 0));

        let keys: HashSet<ChunkKey> = s.keys().copied().collect();
        assert_eq!(keys, expected_keys(center));
        assert!(s.keys().all(|k| k.chebyshev(&center) <= 1));
    }

    #[test]
    fn teleport_replaces_everything() {
        let mut s = store();
        s.update(DVec3::zero());
        let center = s.update(DVec3::new(1e9, -1e9, 3e8));
        let keys: HashSet<ChunkKey> = s.keys().copied().collect();
        assert_eq!(keys, expected_keys(center));
    }

    #[test]
    fn every_chunk_has_exact_star_count_within_bounds() {
        let mut s = store();
        s.update(DVec3::new(-3.0, 9000.0, -70000.0));
        let (size, per_chunk) = (s.chunk_size(), s.stars_per_chunk());
        assert_eq!((size, per_chunk), (4096.0, 256));
        for chunk in s.chunks() {
            assert_eq!(chunk.len(), per_chunk);
            assert!(chunk.stars().iter().all(|st| chunk.contains(st.position, size)));
        }
        assert_eq!(s.star_count(), MAX_RESIDENT_CHUNKS * per_chunk);
        assert_eq!(s.stars().count(), MAX_RESIDENT_CHUNKS * per_chunk);
    }

    #[test]
    fn ensure_is_idempotent_for_resident_keys() {
        let mut s = store();
        let center = ChunkKey::new(0, 0, 0);
        assert_eq!(s.ensure_neighborhood(center), 27);
        let before: Vec<Star> = s.get(&center).map(|c| c.stars().to_vec()).unwrap_or_default();
        assert_eq!(s.ensure_neighborhood(center), 0);
        assert_eq!(s.get(&center).map(|c| c.stars().to_vec()).unwrap_or_default(), before);
    }

    #[test]
    fn regenerated_chunk_gets_new_stars() {
        let mut s = store();
        s.update(DVec3::zero());
        let key = ChunkKey::new(-1, 0, 0);
        let first: Vec<Star> = s.get(&key).map(|c| c.stars().to_vec()).unwrap_or_default();

        s.update(DVec3::new(s.chunk_size() * 5.0, 0.0, 0.0));
        assert!(!s.contains(&key));

        s.update(DVec3::zero());
        let second: Vec<Star> = s.get(&key).map(|c| c.stars().to_vec()).unwrap_or_default();
        assert_eq!(second.len(), s.stars_per_chunk());
        assert_ne!(first, second);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let mut a = store();
        let mut b = store();
        a.update(DVec3::zero());
        b.update(DVec3::zero());
        let key = ChunkKey::new(1, 1, 1);
        assert_eq!(
            a.get(&key).map(|c| c.stars().to_vec()),
            b.get(&key).map(|c| c.stars().to_vec())
        );
    }

    #[test]
    fn evict_without_ensure_only_removes() {
        let mut s = store();
        s.update(DVec3::zero());
        assert_eq!(s.evict_out_of_range(ChunkKey::new(2, 0, 0)), 18);
        assert!(s.keys().all(|k| k.x == 1));
    }
}
