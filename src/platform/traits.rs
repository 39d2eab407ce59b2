//! Collaborator contracts
//!
//! The adapter drives four collaborators: the native backend (GPU device,
//! window and swap chain), the engine's texture subsystem, the renderer, and
//! the flatscreen input layer. Each is consumed only through the calls below.

use std::fmt::Debug;

use nalgebra::Matrix4;

use super::events::WindowEvent;
use crate::error::PlatformResult;
use crate::state::{EngineState, ScrollAccumulator};
use crate::types::{ClearFlags, Color128, SurfaceFormat, TexFormat, Viewport, WindowHandle};

/// Native side of the adapter: GPU device, window and swap chain.
pub trait PlatformBackend {
    /// Backing surface handed out for each swap chain buffer.
    type Surface;

    /// Per-frame device bookkeeping. Errors once the device has been removed
    /// or reset.
    fn device_update(&mut self) -> PlatformResult<()>;

    /// Drain every pending native message without blocking, appending the
    /// translated events in arrival order.
    fn pump_messages(&mut self, events: &mut Vec<WindowEvent>);

    fn set_viewport(&mut self, viewport: Viewport);

    /// Reallocate the swap chain buffers, keeping count, format and flags.
    fn resize_buffers(&mut self, width: u32, height: u32) -> PlatformResult<()>;

    /// Swap chain buffer 0.
    fn back_buffer(&mut self) -> PlatformResult<Self::Surface>;

    fn present(&mut self, sync_interval: u32) -> PlatformResult<()>;

    fn window_handle(&self) -> WindowHandle;

    fn release_swap_chain(&mut self);

    fn device_shutdown(&mut self);
}

/// Engine texture subsystem, as far as render targets go.
pub trait TextureSystem<S> {
    type Handle: Copy + Debug + PartialEq;

    fn create_render_target(&mut self, format: TexFormat) -> Self::Handle;

    fn set_id(&mut self, tex: Self::Handle, id: &str);

    /// Bind a native surface as the texture's backing storage.
    fn set_surface(&mut self, tex: Self::Handle, surface: S, format: SurfaceFormat);

    /// Attach a depth buffer matching the current surface size.
    fn add_zbuffer(&mut self, tex: Self::Handle, format: TexFormat);

    /// Drop the backing surface (and views onto it), keeping the texture.
    fn release_surface(&mut self, tex: Self::Handle);

    fn release(&mut self, tex: Self::Handle);

    fn clear(&mut self, tex: Self::Handle, color: Color128, flags: ClearFlags);

    /// Make `tex` the active draw target.
    fn set_active(&mut self, tex: Self::Handle);
}

pub trait Renderer {
    /// Display size changed; rebuild the projection.
    fn update_projection(&mut self, width: u32, height: u32);

    fn clear_color(&self) -> Color128;

    /// World transform of the root camera.
    fn camera_root(&self) -> Matrix4<f32>;

    fn projection(&self) -> Matrix4<f32>;

    /// Submit the frame's draw queue once per view/projection pair.
    fn draw(&mut self, views: &[Matrix4<f32>], projections: &[Matrix4<f32>]);

    /// Empty the per-frame draw queue.
    fn clear_queue(&mut self);
}

/// Mouse/keyboard layer fed by the window.
pub trait FlatscreenInput {
    fn init(&mut self, state: &EngineState);

    /// Per-frame poll. Owns resetting the scroll accumulator.
    fn update(&mut self, state: &EngineState, scroll: &mut ScrollAccumulator);

    /// Late update just before drawing, for predicted poses.
    fn update_predicted(&mut self);

    fn shutdown(&mut self);
}
