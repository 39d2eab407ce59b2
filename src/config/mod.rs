//! Windowed-mode configuration
//!
//! Settings consumed once at init: the display name (window title and class),
//! the initial client size and position, and the render target clear color.

mod defaults;
mod settings;

pub use defaults::*;
pub use settings::FlatscreenSettings;
