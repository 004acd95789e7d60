// ============================================
// GUI Module - HUD поверх звёздного поля
// ============================================

mod seven_segment;
mod stroke_font;
mod galaxy;
mod gyroscope;
mod scene;
mod hud;

pub use seven_segment::{draw_text, text_width, TextAlign};
pub use stroke_font::{draw_label, label_width};
pub use galaxy::{GalaxyBackdrop, GalaxyParams};
pub use gyroscope::{depth_alpha, gyro_axes, AxisMarker, GyroAxis, Gyroscope};
pub use scene::{draw_planets, draw_stars, star_brightness};
pub use hud::{format_speed, throttle_layout, Hud};
