//! Opens a flatscreen window and runs the frame loop until it is closed.
//!
//! Settings are read from `flatscreen.json` in the working directory, or from
//! the path in `FLATSCREEN_SETTINGS`. Set `RUST_LOG=debug` to watch resizes.

use anyhow::Result;
use flatscreen::FlatscreenSettings;

#[cfg(target_os = "windows")]
mod demo {
    use flatscreen::{Color128, EngineState, FlatscreenInput, Renderer, ScrollAccumulator};
    use log::debug;
    use nalgebra::Matrix4;

    /// Clears to a fixed color and keeps a perspective projection in sync.
    pub struct ClearRenderer {
        clear_color: Color128,
        projection: Matrix4<f32>,
        frames: u64,
    }

    fn perspective(width: u32, height: u32) -> Matrix4<f32> {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Matrix4::new_perspective(aspect, 90f32.to_radians(), 0.01, 50.0)
    }

    impl ClearRenderer {
        pub fn new(clear_color: Color128, width: u32, height: u32) -> Self {
            Self {
                clear_color,
                projection: perspective(width, height),
                frames: 0,
            }
        }
    }

    impl Renderer for ClearRenderer {
        fn update_projection(&mut self, width: u32, height: u32) {
            self.projection = perspective(width, height);
        }

        fn clear_color(&self) -> Color128 {
            self.clear_color
        }

        fn camera_root(&self) -> Matrix4<f32> {
            Matrix4::identity()
        }

        fn projection(&self) -> Matrix4<f32> {
            self.projection
        }

        fn draw(&mut self, _views: &[Matrix4<f32>], _projections: &[Matrix4<f32>]) {
            self.frames += 1;
        }

        fn clear_queue(&mut self) {}
    }

    /// Logs wheel movement and consumes it each frame.
    #[derive(Default)]
    pub struct LogInput;

    impl FlatscreenInput for LogInput {
        fn init(&mut self, _state: &EngineState) {}

        fn update(&mut self, state: &EngineState, scroll: &mut ScrollAccumulator) {
            if scroll.value() != 0.0 {
                debug!("scroll {} (focused: {})", scroll.value(), state.focused);
            }
            scroll.reset();
        }

        fn update_predicted(&mut self) {}

        fn shutdown(&mut self) {}
    }
}

fn load_settings() -> Result<FlatscreenSettings> {
    let path = std::env::var("FLATSCREEN_SETTINGS").unwrap_or_else(|_| "flatscreen.json".into());
    Ok(FlatscreenSettings::load_from(path)?)
}

#[cfg(target_os = "windows")]
fn main() -> Result<()> {
    env_logger::init();

    let settings = load_settings()?;
    let renderer = demo::ClearRenderer::new(settings.clear_color, settings.width, settings.height);
    let mut window = flatscreen::platform::windows::init(&settings, renderer, demo::LogInput)?;

    while window.is_running() {
        if let Err(e) = window.step_begin() {
            log::error!("{e}");
        }
        if !window.is_running() {
            break;
        }
        window.step_end();
        window.vsync()?;
    }

    window.shutdown();
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn main() -> Result<()> {
    env_logger::init();
    let settings = load_settings()?;
    anyhow::bail!(
        "'{}' needs the Windows backend; this build has none",
        settings.display_name
    )
}
