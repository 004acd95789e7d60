// ============================================
// Player Module - Корабль, управление, тяга
// ============================================

mod ship;
mod controller;
mod throttle;

pub use ship::*;
pub use controller::*;
pub use throttle::*;
