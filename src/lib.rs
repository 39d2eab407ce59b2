//! Windowed ("flatscreen") presentation backend for a rendering engine.
//!
//! Creates a native window, wires a double-buffered swap chain to the engine's
//! render target, feeds window events into engine state and presents frames.
//! The adapter core is platform-neutral; the Win32 backend lives in
//! `platform::windows`.

pub mod config;
pub mod error;
pub mod flatscreen;
pub mod platform;
pub mod resize;
pub mod state;
pub mod types;

pub use config::FlatscreenSettings;
pub use error::{FlatscreenError, FlatscreenResult, InitError, PlatformError, PlatformResult};
pub use flatscreen::{Flatscreen, RENDER_TARGET_ID, SYNC_INTERVAL};
pub use platform::{
    FlatscreenInput, PlatformBackend, Renderer, SizeKind, TextureSystem, WindowEvent,
};
pub use resize::{ResizeState, ResizeTracker};
pub use state::{DisplayType, EngineState, ScrollAccumulator};
pub use types::*;
