use crate::types::Color128;

// Window defaults
pub fn default_display_name() -> String {
    "Flatscreen".to_string()
}

pub fn default_width() -> u32 {
    1280
}

pub fn default_height() -> u32 {
    720
}

pub fn default_pos_x() -> i32 {
    100
}

pub fn default_pos_y() -> i32 {
    100
}

// Render target defaults
pub fn default_clear_color() -> Color128 {
    Color128::BLACK
}
