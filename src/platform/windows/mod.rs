//! Windows backend
//!
//! - `window`: Win32 window class, window and message trampoline
//! - `d3d11`: Direct3D 11 device
//! - `dxgi`: flip-discard swap chain
//! - `render_targets`: render target texture system over swap chain buffers
//! - `backend`: the [`PlatformBackend`](crate::platform::PlatformBackend) tying them together

pub mod backend;
pub mod d3d11;
pub mod dxgi;
pub mod render_targets;
pub mod win_api;
pub mod window;

pub use backend::Win32Backend;
pub use d3d11::D3d11Device;
pub use dxgi::DxgiSwapChain;
pub use render_targets::{D3d11RenderTargets, RenderTargetId};
pub use window::Win32Window;

use crate::config::FlatscreenSettings;
use crate::error::InitError;
use crate::flatscreen::Flatscreen;
use crate::platform::traits::{FlatscreenInput, Renderer};

/// Adapter wired to the Win32 backend and D3D11 render targets.
pub type Win32Flatscreen<R, I> = Flatscreen<Win32Backend, D3d11RenderTargets, R, I>;

/// Bring up windowed mode: device, window, swap chain, render target, input.
pub fn init<R, I>(
    settings: &FlatscreenSettings,
    renderer: R,
    input: I,
) -> Result<Win32Flatscreen<R, I>, InitError>
where
    R: Renderer,
    I: FlatscreenInput,
{
    let settings = settings.clone().sanitized();
    let backend = Win32Backend::create(&settings)?;
    let textures = backend
        .device()
        .map(D3d11RenderTargets::new)
        .ok_or_else(|| InitError::Device("device released during init".into()))?;
    Flatscreen::new(&settings, backend, textures, renderer, input)
}
