// ============================================
// Core Module - Конфиг, ошибки, симуляция, приложение
// ============================================

pub mod app;
mod config;
mod error;
mod resources;
mod simulation;

pub use app::{run, App};
pub use config::{SpaceConfig, CONFIG_ENV, CONFIG_FILE};
pub use error::SpaceError;
pub use resources::{SpaceResources, WINDOW_TITLE};
pub use simulation::{FrameOutput, ProjectedPlanet, ProjectedStar, Simulation};
