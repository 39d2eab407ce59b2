//! Platform layer
//!
//! # Modules
//! - [`events`]: platform-neutral window events
//! - [`message`]: raw window message decoding
//! - [`traits`]: collaborator contracts the adapter drives
//! - `windows`: Win32 / Direct3D 11 / DXGI backend

pub mod events;
pub mod message;
pub mod traits;

#[cfg(target_os = "windows")]
pub mod windows;

pub use events::*;
pub use traits::*;
