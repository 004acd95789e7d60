// ============================================
// Systems Module - ECS-подобные системы
// ============================================

mod input_system;
mod update_system;
mod render_system;
mod init_system;

pub use input_system::{InputSystem, InputAction};
pub use update_system::UpdateSystem;
pub use render_system::RenderSystem;
pub use init_system::InitSystem;
