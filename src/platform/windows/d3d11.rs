//! Direct3D 11 device
//!
//! Owns the device and its immediate context. Hardware drivers are tried
//! first, then WARP so the window still comes up on machines without a
//! usable GPU driver.

use log::info;
use windows::Win32::Foundation::{E_FAIL, HMODULE};
use windows::Win32::Graphics::Direct3D::{
    D3D_DRIVER_TYPE, D3D_DRIVER_TYPE_HARDWARE, D3D_DRIVER_TYPE_WARP, D3D_FEATURE_LEVEL,
    D3D_FEATURE_LEVEL_10_0, D3D_FEATURE_LEVEL_11_0,
};
use windows::Win32::Graphics::Direct3D11::{
    D3D11_CREATE_DEVICE_BGRA_SUPPORT, D3D11_CREATE_DEVICE_SINGLETHREADED, D3D11_SDK_VERSION,
    D3D11_VIEWPORT, D3D11CreateDevice, ID3D11Device, ID3D11DeviceContext,
};
use windows::core::Result;

use crate::types::Viewport;

const FEATURE_LEVELS: [D3D_FEATURE_LEVEL; 2] = [D3D_FEATURE_LEVEL_11_0, D3D_FEATURE_LEVEL_10_0];

pub struct D3d11Device {
    device: ID3D11Device,
    context: ID3D11DeviceContext,
}

fn create_device(driver_type: D3D_DRIVER_TYPE) -> Result<(ID3D11Device, ID3D11DeviceContext)> {
    let mut device = None;
    let mut context = None;

    // All window and GPU calls stay on one thread.
    let flags = D3D11_CREATE_DEVICE_BGRA_SUPPORT | D3D11_CREATE_DEVICE_SINGLETHREADED;

    unsafe {
        D3D11CreateDevice(
            None,
            driver_type,
            HMODULE::default(),
            flags,
            Some(&FEATURE_LEVELS),
            D3D11_SDK_VERSION,
            Some(&mut device),
            None,
            Some(&mut context),
        )?;
    }

    match (device, context) {
        (Some(d), Some(c)) => Ok((d, c)),
        _ => Err(windows::core::Error::new(E_FAIL, "Failed to create D3D11 device")),
    }
}

impl D3d11Device {
    pub fn create() -> Result<Self> {
        let (device, context) = match create_device(D3D_DRIVER_TYPE_HARDWARE) {
            Ok(pair) => pair,
            Err(e) => {
                info!("hardware D3D11 device unavailable ({e:?}), falling back to WARP");
                create_device(D3D_DRIVER_TYPE_WARP)?
            }
        };

        Ok(Self { device, context })
    }

    #[inline]
    pub fn device(&self) -> &ID3D11Device {
        &self.device
    }

    #[inline]
    pub fn context(&self) -> &ID3D11DeviceContext {
        &self.context
    }

    /// Per-frame check for a removed or reset device. Removal is permanent,
    /// so every later call fails too.
    pub fn update(&self) -> Result<()> {
        unsafe { self.device.GetDeviceRemovedReason() }
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        let vp = D3D11_VIEWPORT {
            TopLeftX: viewport.x,
            TopLeftY: viewport.y,
            Width: viewport.width,
            Height: viewport.height,
            MinDepth: 0.0,
            MaxDepth: 1.0,
        };
        unsafe { self.context.RSSetViewports(Some(&[vp])) };
    }

    /// Unbind everything and flush pending work before release.
    pub fn shutdown(&self) {
        unsafe {
            self.context.ClearState();
            self.context.Flush();
        }
    }
}
