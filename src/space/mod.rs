// ============================================
// Space Module - Бесконечное звёздное поле
// ============================================
// Кватернионная камера + стриминг чанков со звёздами + перспективная проекция.
// Разделено на модули по ECS-принципам.

pub mod math;
pub mod player;
pub mod starfield;
pub mod render;
pub mod gui;

pub mod core;
pub mod systems;

pub use self::core::app::run;
