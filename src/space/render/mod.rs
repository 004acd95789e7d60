// ============================================
// Render Module - Проекция и отрисовка
// ============================================

mod projection;
mod batch;
mod renderer;

pub use projection::{Projector, ProjectedPoint};
pub use batch::{UiBatch, UiVertex, with_alpha};
pub use renderer::Renderer;
