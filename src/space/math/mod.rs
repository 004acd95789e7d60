// ============================================
// Math Module - Кватернионы и ориентация
// ============================================

mod quaternion;
mod orientation;

pub use quaternion::Quat;
pub use orientation::{Orientation, EulerAngles};
