//! Resize synchronization
//!
//! Dragging a window border produces a stream of size messages. Reallocating
//! swap chain buffers for each one is wasteful, so [`ResizeTracker`] only asks
//! for a resize at drag end, or immediately for changes that have no drag end
//! (maximize, restore, programmatic moves while a check is pending).

use crate::platform::events::SizeKind;

/// Resize-pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    /// Size messages are recorded but not applied.
    Idle,
    /// The next size message is applied immediately.
    #[default]
    CheckPending,
    /// The user is dragging the border or caption.
    Dragging,
}

#[derive(Debug, Clone, Default)]
pub struct ResizeTracker {
    state: ResizeState,
    last_size: Option<(u32, u32)>,
}

impl ResizeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> ResizeState {
        self.state
    }

    /// Most recent client size reported by the window.
    #[inline]
    pub fn last_size(&self) -> Option<(u32, u32)> {
        self.last_size
    }

    pub fn enter_size_move(&mut self) {
        self.state = ResizeState::Dragging;
    }

    /// Record a size message. Returns the size to apply now, if any.
    pub fn size_changed(&mut self, width: u32, height: u32, kind: SizeKind) -> Option<(u32, u32)> {
        if kind == SizeKind::Minimized {
            // 0x0 client area; wait for the restore command.
            self.state = ResizeState::Idle;
            return None;
        }
        if width == 0 || height == 0 {
            // Border dragged onto the caption. Nothing valid to allocate.
            return None;
        }

        self.last_size = Some((width, height));
        if self.state == ResizeState::CheckPending || kind == SizeKind::Maximized {
            self.state = ResizeState::CheckPending;
            return self.last_size;
        }
        None
    }

    /// Drag finished. WM_SIZE precedes this, so the stored size is final.
    pub fn exit_size_move(&mut self) -> Option<(u32, u32)> {
        if self.state != ResizeState::Dragging {
            return None;
        }
        self.state = ResizeState::CheckPending;
        self.last_size
    }

    pub fn restore_requested(&mut self) {
        self.state = ResizeState::CheckPending;
    }
}
