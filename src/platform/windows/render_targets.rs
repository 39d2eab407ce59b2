//! Direct3D 11 render targets
//!
//! A minimal [`TextureSystem`] over swap chain buffers: a color view per bound
//! surface and an optional 16-bit depth buffer that follows the surface size.
//! Failures here cannot be returned through the trait, so they are logged and
//! leave the target without the affected view.

use log::{debug, error, warn};
use windows::Win32::Graphics::Direct3D11::{
    D3D11_BIND_DEPTH_STENCIL, D3D11_CLEAR_DEPTH, D3D11_RENDER_TARGET_VIEW_DESC,
    D3D11_RENDER_TARGET_VIEW_DESC_0, D3D11_RTV_DIMENSION_TEXTURE2D, D3D11_TEX2D_RTV,
    D3D11_TEXTURE2D_DESC, D3D11_USAGE_DEFAULT, ID3D11DepthStencilView, ID3D11Device,
    ID3D11DeviceContext, ID3D11RenderTargetView, ID3D11Texture2D,
};
use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_FORMAT, DXGI_FORMAT_D16_UNORM, DXGI_FORMAT_R8G8B8A8_UNORM_SRGB, DXGI_SAMPLE_DESC,
};
use windows::core::Result;

use super::d3d11::D3d11Device;
use crate::platform::traits::TextureSystem;
use crate::types::{ClearFlags, Color128, SurfaceFormat, TexFormat};

/// Index into [`D3d11RenderTargets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(usize);

#[derive(Default)]
struct RenderTarget {
    id: String,
    surface: Option<ID3D11Texture2D>,
    color_view: Option<ID3D11RenderTargetView>,
    size: (u32, u32),
    depth_format: Option<TexFormat>,
    depth: Option<(ID3D11Texture2D, ID3D11DepthStencilView)>,
}

pub struct D3d11RenderTargets {
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    targets: Vec<Option<RenderTarget>>,
}

fn surface_format(format: SurfaceFormat) -> DXGI_FORMAT {
    match format {
        SurfaceFormat::Rgba8UnormSrgb => DXGI_FORMAT_R8G8B8A8_UNORM_SRGB,
    }
}

fn depth_format(format: TexFormat) -> Option<DXGI_FORMAT> {
    match format {
        TexFormat::Depth16 => Some(DXGI_FORMAT_D16_UNORM),
        TexFormat::Rgba32Linear => None,
    }
}

impl D3d11RenderTargets {
    pub fn new(device: &D3d11Device) -> Self {
        Self {
            device: device.device().clone(),
            context: device.context().clone(),
            targets: Vec::new(),
        }
    }

    fn target_mut(&mut self, tex: RenderTargetId) -> Option<&mut RenderTarget> {
        let target = self.targets.get_mut(tex.0).and_then(Option::as_mut);
        if target.is_none() {
            warn!("unknown render target {tex:?}");
        }
        target
    }

    /// Pixel size of the currently bound surface.
    pub fn size(&self, tex: RenderTargetId) -> Option<(u32, u32)> {
        self.targets
            .get(tex.0)
            .and_then(Option::as_ref)
            .filter(|t| t.surface.is_some())
            .map(|t| t.size)
    }

    fn create_color_view(
        device: &ID3D11Device,
        surface: &ID3D11Texture2D,
        format: DXGI_FORMAT,
    ) -> Result<ID3D11RenderTargetView> {
        let desc = D3D11_RENDER_TARGET_VIEW_DESC {
            Format: format,
            ViewDimension: D3D11_RTV_DIMENSION_TEXTURE2D,
            Anonymous: D3D11_RENDER_TARGET_VIEW_DESC_0 {
                Texture2D: D3D11_TEX2D_RTV { MipSlice: 0 },
            },
        };
        let mut view = None;
        unsafe { device.CreateRenderTargetView(surface, Some(&desc), Some(&mut view))? };
        view.ok_or_else(|| windows::core::Error::from(windows::Win32::Foundation::E_FAIL))
    }

    fn create_depth(
        device: &ID3D11Device,
        (width, height): (u32, u32),
        format: DXGI_FORMAT,
    ) -> Result<(ID3D11Texture2D, ID3D11DepthStencilView)> {
        let desc = D3D11_TEXTURE2D_DESC {
            Width: width,
            Height: height,
            MipLevels: 1,
            ArraySize: 1,
            Format: format,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: D3D11_BIND_DEPTH_STENCIL.0 as u32,
            CPUAccessFlags: 0,
            MiscFlags: 0,
        };

        let mut texture = None;
        unsafe { device.CreateTexture2D(&desc, None, Some(&mut texture))? };
        let texture =
            texture.ok_or_else(|| windows::core::Error::from(windows::Win32::Foundation::E_FAIL))?;

        let mut view = None;
        unsafe { device.CreateDepthStencilView(&texture, None, Some(&mut view))? };
        let view =
            view.ok_or_else(|| windows::core::Error::from(windows::Win32::Foundation::E_FAIL))?;
        Ok((texture, view))
    }

    fn rebuild_depth(device: &ID3D11Device, target: &mut RenderTarget) {
        target.depth = None;
        let Some(format) = target.depth_format.and_then(depth_format) else {
            return;
        };
        if target.surface.is_none() {
            return;
        }
        match Self::create_depth(device, target.size, format) {
            Ok(depth) => target.depth = Some(depth),
            Err(e) => error!("depth buffer for '{}' failed: {e:?}", target.id),
        }
    }
}

impl TextureSystem<ID3D11Texture2D> for D3d11RenderTargets {
    type Handle = RenderTargetId;

    fn create_render_target(&mut self, format: TexFormat) -> RenderTargetId {
        debug!("creating render target ({format:?})");
        self.targets.push(Some(RenderTarget::default()));
        RenderTargetId(self.targets.len() - 1)
    }

    fn set_id(&mut self, tex: RenderTargetId, id: &str) {
        if let Some(target) = self.target_mut(tex) {
            target.id = id.to_string();
        }
    }

    fn set_surface(&mut self, tex: RenderTargetId, surface: ID3D11Texture2D, format: SurfaceFormat) {
        let device = self.device.clone();
        let Some(target) = self.target_mut(tex) else {
            return;
        };

        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { surface.GetDesc(&mut desc) };
        target.size = (desc.Width, desc.Height);

        target.color_view = match Self::create_color_view(&device, &surface, surface_format(format)) {
            Ok(view) => Some(view),
            Err(e) => {
                error!("render target view for '{}' failed: {e:?}", target.id);
                None
            }
        };
        target.surface = Some(surface);
        Self::rebuild_depth(&device, target);
    }

    fn add_zbuffer(&mut self, tex: RenderTargetId, format: TexFormat) {
        let device = self.device.clone();
        if let Some(target) = self.target_mut(tex) {
            target.depth_format = Some(format);
            Self::rebuild_depth(&device, target);
        }
    }

    fn release_surface(&mut self, tex: RenderTargetId) {
        // The context keeps bound views (and so the buffers) alive.
        unsafe { self.context.OMSetRenderTargets(None, None::<&ID3D11DepthStencilView>) };
        if let Some(target) = self.target_mut(tex) {
            target.color_view = None;
            target.depth = None;
            target.surface = None;
        }
    }

    fn release(&mut self, tex: RenderTargetId) {
        self.release_surface(tex);
        if let Some(slot) = self.targets.get_mut(tex.0) {
            *slot = None;
        }
    }

    fn clear(&mut self, tex: RenderTargetId, color: Color128, flags: ClearFlags) {
        let Some(target) = self.targets.get(tex.0).and_then(Option::as_ref) else {
            return;
        };
        unsafe {
            if flags.color
                && let Some(view) = &target.color_view
            {
                self.context.ClearRenderTargetView(view, &color.to_array());
            }
            if flags.depth
                && let Some((_, view)) = &target.depth
            {
                self.context
                    .ClearDepthStencilView(view, D3D11_CLEAR_DEPTH.0 as u32, 1.0, 0);
            }
        }
    }

    fn set_active(&mut self, tex: RenderTargetId) {
        let Some(target) = self.targets.get(tex.0).and_then(Option::as_ref) else {
            return;
        };
        let depth = target.depth.as_ref().map(|(_, view)| view);
        unsafe {
            self.context
                .OMSetRenderTargets(Some(&[target.color_view.clone()]), depth);
        }
    }
}
