// Unified Error Handling Module
//
// Error types shared by the adapter core and the native backends

use std::io;
use thiserror::Error;

/// Main adapter error type
#[derive(Debug, Error)]
pub enum FlatscreenError {
    #[error("Initialization error: {0}")]
    Init(#[from] InitError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failures while bringing up windowed mode. None of them are retried.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("GPU device creation failed: {0}")]
    Device(String),

    #[error("Window class registration failed: {0}")]
    WindowClass(String),

    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Swap chain creation failed: {0}")]
    SwapChain(String),

    #[error("Render target setup failed: {0}")]
    RenderTarget(String),
}

/// Native failures after init.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Swap chain buffer resize failed: {0}")]
    ResizeBuffers(String),

    #[error("Swap chain buffer fetch failed: {0}")]
    BackBuffer(String),

    #[error("Present failed: {0}")]
    Present(String),

    #[error("GPU device removed: {0}")]
    DeviceLost(String),
}

/// Result type alias for convenience
pub type FlatscreenResult<T> = Result<T, FlatscreenError>;

pub type PlatformResult<T> = Result<T, PlatformError>;

impl From<serde_json::Error> for FlatscreenError {
    fn from(err: serde_json::Error) -> Self {
        FlatscreenError::Config(err.to_string())
    }
}

/// Helper trait for converting Windows results into a chosen error variant
#[cfg(target_os = "windows")]
pub trait IntoPlatformResult<T> {
    fn or_platform(self, make: fn(String) -> PlatformError) -> PlatformResult<T>;
    fn or_init(self, make: fn(String) -> InitError) -> Result<T, InitError>;
}

#[cfg(target_os = "windows")]
impl<T> IntoPlatformResult<T> for windows::core::Result<T> {
    fn or_platform(self, make: fn(String) -> PlatformError) -> PlatformResult<T> {
        self.map_err(|e| make(format!("{:?}", e)))
    }

    fn or_init(self, make: fn(String) -> InitError) -> Result<T, InitError> {
        self.map_err(|e| make(format!("{:?}", e)))
    }
}
