//! Window/presentation adapter
//!
//! [`Flatscreen`] owns the native backend, the render target wired to the swap
//! chain's back buffer, and the engine state the window feeds. Everything runs
//! on the thread that owns the window: message handling, resizes and draws are
//! strictly ordered, so a resize always completes before the next draw that
//! references the render target.

use log::{debug, error, info, warn};
use nalgebra::Matrix4;

use crate::config::FlatscreenSettings;
use crate::error::{InitError, PlatformResult};
use crate::platform::events::WindowEvent;
use crate::platform::traits::{FlatscreenInput, PlatformBackend, Renderer, TextureSystem};
use crate::resize::{ResizeState, ResizeTracker};
use crate::state::{DisplayType, EngineState, ScrollAccumulator};
use crate::types::{ClearFlags, SurfaceFormat, TexFormat, Viewport, WindowHandle};

/// Identifier given to the swap chain render target.
pub const RENDER_TARGET_ID: &str = "flatscreen/system/rendertarget";

/// Present waits for one vertical blank.
pub const SYNC_INTERVAL: u32 = 1;

pub struct Flatscreen<B, T, R, I>
where
    B: PlatformBackend,
    T: TextureSystem<B::Surface>,
    R: Renderer,
    I: FlatscreenInput,
{
    backend: B,
    textures: T,
    renderer: R,
    input: I,
    target: T::Handle,
    state: EngineState,
    resize: ResizeTracker,
    scroll: ScrollAccumulator,
    // Reused between pumps.
    events: Vec<WindowEvent>,
    torn_down: bool,
}

impl<B, T, R, I> Flatscreen<B, T, R, I>
where
    B: PlatformBackend,
    T: TextureSystem<B::Surface>,
    R: Renderer,
    I: FlatscreenInput,
{
    /// Wire an already created backend to a new render target.
    ///
    /// The backend's swap chain must have been created at the configured
    /// size. On failure the backend is shut down before returning.
    pub fn new(
        settings: &FlatscreenSettings,
        mut backend: B,
        mut textures: T,
        renderer: R,
        mut input: I,
    ) -> Result<Self, InitError> {
        let settings = settings.clone().sanitized();
        let mut state = EngineState::new(settings.width, settings.height);
        state.display_type = DisplayType::Opaque;

        let back_buffer = match backend.back_buffer() {
            Ok(surface) => surface,
            Err(e) => {
                backend.release_swap_chain();
                backend.device_shutdown();
                return Err(InitError::RenderTarget(e.to_string()));
            }
        };

        let target = textures.create_render_target(TexFormat::Rgba32Linear);
        textures.set_id(target, RENDER_TARGET_ID);
        textures.set_surface(target, back_buffer, SurfaceFormat::Rgba8UnormSrgb);
        textures.add_zbuffer(target, TexFormat::Depth16);

        input.init(&state);

        info!(
            "flatscreen '{}' ready at {}x{}",
            settings.display_name, state.display_width, state.display_height
        );

        Ok(Self {
            backend,
            textures,
            renderer,
            input,
            target,
            state,
            resize: ResizeTracker::new(),
            scroll: ScrollAccumulator::default(),
            events: Vec::new(),
            torn_down: false,
        })
    }

    /// Resize the swap chain and render target to a new client size.
    ///
    /// Same size as the current display, or a zero area, is a no-op. A
    /// failure to reallocate or refetch the back buffer leaves no valid render
    /// target, so it clears the run flag as well as returning the error.
    pub fn resize(&mut self, width: u32, height: u32) -> PlatformResult<()> {
        if (width, height) == self.state.display_size() {
            return Ok(());
        }
        if width == 0 || height == 0 {
            debug!("ignoring empty client area {width}x{height}");
            return Ok(());
        }
        self.state.display_width = width;
        self.state.display_height = height;
        debug!("resized to {width}x{height}");

        self.textures.release_surface(self.target);
        if let Err(e) = self.rebind_back_buffer(width, height) {
            error!("swap chain resize to {width}x{height} failed: {e}");
            self.state.request_stop();
            return Err(e);
        }

        self.renderer.update_projection(width, height);
        Ok(())
    }

    fn rebind_back_buffer(&mut self, width: u32, height: u32) -> PlatformResult<()> {
        self.backend.resize_buffers(width, height)?;
        let back_buffer = self.backend.back_buffer()?;
        self.textures
            .set_surface(self.target, back_buffer, SurfaceFormat::Rgba8UnormSrgb);
        Ok(())
    }

    /// Apply one window event to engine state.
    pub fn handle_event(&mut self, event: WindowEvent) -> PlatformResult<()> {
        match event {
            WindowEvent::CloseRequested => {
                if self.state.request_stop() {
                    info!("close requested");
                }
            }
            WindowEvent::FocusGained => self.state.focused = true,
            WindowEvent::FocusLost => self.state.focused = false,
            WindowEvent::MouseWheel { delta } => self.scroll.add(f32::from(delta)),
            WindowEvent::EnterSizeMove => self.resize.enter_size_move(),
            WindowEvent::ExitSizeMove => {
                if let Some((width, height)) = self.resize.exit_size_move() {
                    self.resize(width, height)?;
                }
            }
            WindowEvent::Resized {
                width,
                height,
                kind,
            } => {
                if let Some((width, height)) = self.resize.size_changed(width, height, kind) {
                    self.resize(width, height)?;
                } else {
                    debug!("deferring {width}x{height} ({kind:?}) in {:?}", self.resize.state());
                }
            }
            WindowEvent::RestoreRequested => self.resize.restore_requested(),
        }
        Ok(())
    }

    /// Start a frame: device bookkeeping, message drain, input poll.
    ///
    /// A removed device stops the run loop. Messages are still pumped and
    /// every pending event is handled even if one fails; the first error is
    /// returned.
    pub fn step_begin(&mut self) -> PlatformResult<()> {
        let mut result = self.backend.device_update();
        if let Err(e) = &result
            && self.state.request_stop()
        {
            error!("{e}");
        }

        let mut events = std::mem::take(&mut self.events);
        self.backend.pump_messages(&mut events);

        for event in events.drain(..) {
            if let Err(e) = self.handle_event(event)
                && result.is_ok()
            {
                result = Err(e);
            }
        }
        self.events = events;

        self.input.update(&self.state, &mut self.scroll);
        result
    }

    /// Finish a frame: clear the render target and draw the queue once from
    /// the root camera.
    pub fn step_end(&mut self) {
        let (width, height) = self.state.display_size();
        self.backend.set_viewport(Viewport::full(width, height));

        let clear_color = self.renderer.clear_color();
        self.textures.clear(self.target, clear_color, ClearFlags::ALL);
        self.textures.set_active(self.target);

        self.input.update_predicted();

        let view = self.renderer.camera_root().try_inverse().unwrap_or_else(|| {
            warn!("camera root is not invertible, drawing with an identity view");
            Matrix4::identity()
        });
        let projection = self.renderer.projection();
        self.renderer.draw(&[view], &[projection]);
        self.renderer.clear_queue();
    }

    /// Present the back buffer, locked to the display refresh.
    pub fn vsync(&mut self) -> PlatformResult<()> {
        self.backend.present(SYNC_INTERVAL).inspect_err(|e| {
            error!("present failed: {e}");
        })
    }

    /// Tear down in reverse acquisition order.
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.input.shutdown();
        self.textures.release(self.target);
        self.backend.release_swap_chain();
        self.backend.device_shutdown();
        info!("flatscreen shut down");
    }

    #[inline]
    pub fn window_handle(&self) -> WindowHandle {
        self.backend.window_handle()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    #[inline]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Mutable engine state for the outer run loop (e.g. to stop it).
    #[inline]
    pub fn state_mut(&mut self) -> &mut EngineState {
        &mut self.state
    }

    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll.value()
    }

    #[inline]
    pub fn resize_state(&self) -> ResizeState {
        self.resize.state()
    }

    #[inline]
    pub fn render_target(&self) -> T::Handle {
        self.target
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn textures(&self) -> &T {
        &self.textures
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<B, T, R, I> Drop for Flatscreen<B, T, R, I>
where
    B: PlatformBackend,
    T: TextureSystem<B::Surface>,
    R: Renderer,
    I: FlatscreenInput,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
