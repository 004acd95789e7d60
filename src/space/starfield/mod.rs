// ============================================
// Starfield Module - Чанки звёзд и планеты
// ============================================

mod chunk_key;
mod chunk;
mod store;
mod planets;

pub use chunk_key::ChunkKey;
pub use chunk::{Star, StarChunk};
pub use store::{ChunkStore, MAX_RESIDENT_CHUNKS};
pub use planets::{Planet, PlanetDef, default_planets, parse_hex_color};
