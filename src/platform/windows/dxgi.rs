//! DXGI swap chain for the flatscreen window
//!
//! Two buffers, flip-discard, created through the factory that owns the
//! device's adapter so device and swap chain always agree on the GPU.

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D11::{ID3D11Device, ID3D11Texture2D};
use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_ALPHA_MODE_UNSPECIFIED, DXGI_FORMAT_R8G8B8A8_UNORM, DXGI_FORMAT_UNKNOWN,
    DXGI_SAMPLE_DESC,
};
use windows::Win32::Graphics::Dxgi::{
    DXGI_PRESENT, DXGI_SCALING_STRETCH, DXGI_SWAP_CHAIN_DESC1, DXGI_SWAP_CHAIN_FLAG,
    DXGI_SWAP_EFFECT_FLIP_DISCARD, DXGI_USAGE_RENDER_TARGET_OUTPUT, IDXGIAdapter, IDXGIDevice2,
    IDXGIFactory2, IDXGIOutput, IDXGISwapChain1,
};
use windows::core::{Interface, Result};

pub const BUFFER_COUNT: u32 = 2;

pub struct DxgiSwapChain {
    swap_chain: IDXGISwapChain1,
}

impl DxgiSwapChain {
    /// Create a swap chain bound to `hwnd`, sized `width` x `height`.
    pub fn create(device: &ID3D11Device, hwnd: HWND, width: u32, height: u32) -> Result<Self> {
        let desc = DXGI_SWAP_CHAIN_DESC1 {
            Width: width,
            Height: height,
            // The render target views the buffers as sRGB.
            Format: DXGI_FORMAT_R8G8B8A8_UNORM,
            Stereo: false.into(),
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: BUFFER_COUNT,
            Scaling: DXGI_SCALING_STRETCH,
            SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
            AlphaMode: DXGI_ALPHA_MODE_UNSPECIFIED,
            Flags: 0,
        };

        let dxgi_device: IDXGIDevice2 = device.cast()?;
        let adapter: IDXGIAdapter = unsafe { dxgi_device.GetParent()? };
        let factory: IDXGIFactory2 = unsafe { adapter.GetParent()? };

        let swap_chain = unsafe {
            factory.CreateSwapChainForHwnd(device, hwnd, &desc, None, None::<&IDXGIOutput>)?
        };

        Ok(Self { swap_chain })
    }

    /// Reallocate buffers at a new size, keeping count, format and flags.
    ///
    /// Every reference to the old buffers must already be released.
    pub fn resize_buffers(&self, width: u32, height: u32) -> Result<()> {
        unsafe {
            self.swap_chain.ResizeBuffers(
                0,
                width,
                height,
                DXGI_FORMAT_UNKNOWN,
                DXGI_SWAP_CHAIN_FLAG(0),
            )
        }
    }

    pub fn back_buffer(&self) -> Result<ID3D11Texture2D> {
        unsafe { self.swap_chain.GetBuffer::<ID3D11Texture2D>(0) }
    }

    pub fn present(&self, sync_interval: u32) -> Result<()> {
        unsafe { self.swap_chain.Present(sync_interval, DXGI_PRESENT(0)) }.ok()
    }
}
