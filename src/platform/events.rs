//! Platform-neutral window events
//!
//! Native window messages the adapter cares about, translated so the adapter
//! core never touches Win32 types.

/// Why a window's client size changed, mirroring the `WM_SIZE` request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeKind {
    #[default]
    Restored,
    Minimized,
    Maximized,
    /// Another window was restored from maximized.
    MaxShow,
    /// Another window was maximized.
    MaxHide,
}

/// Platform-neutral window event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// User asked to close the window.
    CloseRequested,
    FocusGained,
    FocusLost,
    /// Mouse wheel, in native wheel units (120 per notch).
    MouseWheel { delta: i16 },
    /// User started dragging the border or caption.
    EnterSizeMove,
    ExitSizeMove,
    /// Client area changed size.
    Resized {
        width: u32,
        height: u32,
        kind: SizeKind,
    },
    /// The restore ("un-maximize") system command; the new size follows.
    RestoreRequested,
}
