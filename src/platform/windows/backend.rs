use log::info;
use windows::Win32::Graphics::Direct3D11::ID3D11Texture2D;

use super::d3d11::D3d11Device;
use super::dxgi::DxgiSwapChain;
use super::window::Win32Window;
use crate::config::FlatscreenSettings;
use crate::error::{InitError, IntoPlatformResult, PlatformError, PlatformResult};
use crate::platform::events::WindowEvent;
use crate::platform::traits::PlatformBackend;
use crate::types::{Viewport, WindowHandle};

/// Win32 window + D3D11 device + DXGI swap chain.
///
/// Field order is drop order: swap chain, then device, then window.
pub struct Win32Backend {
    swap_chain: Option<DxgiSwapChain>,
    device: Option<D3d11Device>,
    window: Win32Window,
}

impl Win32Backend {
    /// Device first, then window class and window, then the swap chain.
    pub fn create(settings: &FlatscreenSettings) -> Result<Self, InitError> {
        let device = D3d11Device::create().or_init(InitError::Device)?;
        let window = Win32Window::create(settings)?;
        let swap_chain =
            DxgiSwapChain::create(device.device(), window.hwnd(), settings.width, settings.height)
                .or_init(InitError::SwapChain)?;

        info!(
            "created {}x{} swap chain for '{}'",
            settings.width, settings.height, settings.display_name
        );

        Ok(Self {
            swap_chain: Some(swap_chain),
            device: Some(device),
            window,
        })
    }

    /// The live device. `None` after `device_shutdown`.
    pub fn device(&self) -> Option<&D3d11Device> {
        self.device.as_ref()
    }

    fn swap_chain(&self) -> PlatformResult<&DxgiSwapChain> {
        self.swap_chain
            .as_ref()
            .ok_or_else(|| PlatformError::BackBuffer("swap chain released".into()))
    }
}

impl PlatformBackend for Win32Backend {
    type Surface = ID3D11Texture2D;

    fn device_update(&mut self) -> PlatformResult<()> {
        match &self.device {
            Some(device) => device.update().or_platform(PlatformError::DeviceLost),
            None => Err(PlatformError::DeviceLost("device shut down".into())),
        }
    }

    fn pump_messages(&mut self, events: &mut Vec<WindowEvent>) {
        self.window.pump(events);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        if let Some(device) = &self.device {
            device.set_viewport(viewport);
        }
    }

    fn resize_buffers(&mut self, width: u32, height: u32) -> PlatformResult<()> {
        self.swap_chain()?
            .resize_buffers(width, height)
            .or_platform(PlatformError::ResizeBuffers)
    }

    fn back_buffer(&mut self) -> PlatformResult<ID3D11Texture2D> {
        self.swap_chain()?
            .back_buffer()
            .or_platform(PlatformError::BackBuffer)
    }

    fn present(&mut self, sync_interval: u32) -> PlatformResult<()> {
        self.swap_chain()
            .map_err(|e| PlatformError::Present(e.to_string()))?
            .present(sync_interval)
            .or_platform(PlatformError::Present)
    }

    fn window_handle(&self) -> WindowHandle {
        self.window.handle()
    }

    fn release_swap_chain(&mut self) {
        self.swap_chain = None;
    }

    fn device_shutdown(&mut self) {
        if let Some(device) = self.device.take() {
            device.shutdown();
        }
    }
}
