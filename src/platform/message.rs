//! Raw window message translation
//!
//! Decodes the handful of native messages the adapter reacts to. Kept free of
//! Win32 types so the decoding can be exercised on any host; the Windows
//! window procedure feeds raw `(msg, wparam, lparam)` triples through here.

use super::events::{SizeKind, WindowEvent};

// Message identifiers
pub const WM_SIZE: u32 = 0x0005;
pub const WM_SETFOCUS: u32 = 0x0007;
pub const WM_KILLFOCUS: u32 = 0x0008;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_SYSCOMMAND: u32 = 0x0112;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_ENTERSIZEMOVE: u32 = 0x0231;
pub const WM_EXITSIZEMOVE: u32 = 0x0232;

// WM_SYSCOMMAND request types
pub const SC_KEYMENU: usize = 0xF100;
pub const SC_RESTORE: usize = 0xF120;
const SC_MASK: usize = 0xFFF0;

// WM_SIZE request types
pub const SIZE_RESTORED: usize = 0;
pub const SIZE_MINIMIZED: usize = 1;
pub const SIZE_MAXIMIZED: usize = 2;
pub const SIZE_MAXSHOW: usize = 3;
pub const SIZE_MAXHIDE: usize = 4;

/// What the window procedure returns once the event has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Hand the message to the default window procedure.
    Default,
    /// Return 0 without default processing.
    Handled,
    /// Post a quit message, then return 0. The window is not destroyed.
    Quit,
}

/// Result of decoding one native message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translated {
    pub event: Option<WindowEvent>,
    pub disposition: Disposition,
}

impl Translated {
    const fn new(event: Option<WindowEvent>, disposition: Disposition) -> Self {
        Self { event, disposition }
    }

    const fn passthrough() -> Self {
        Self::new(None, Disposition::Default)
    }
}

#[inline]
fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

#[inline]
fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

fn size_kind(wparam: usize) -> SizeKind {
    match wparam {
        SIZE_MINIMIZED => SizeKind::Minimized,
        SIZE_MAXIMIZED => SizeKind::Maximized,
        SIZE_MAXSHOW => SizeKind::MaxShow,
        SIZE_MAXHIDE => SizeKind::MaxHide,
        _ => SizeKind::Restored,
    }
}

/// Decode a native message into an adapter event and a return disposition.
pub fn translate(msg: u32, wparam: usize, lparam: isize) -> Translated {
    match msg {
        WM_CLOSE => Translated::new(Some(WindowEvent::CloseRequested), Disposition::Quit),
        WM_SETFOCUS => Translated::new(Some(WindowEvent::FocusGained), Disposition::Handled),
        WM_KILLFOCUS => Translated::new(Some(WindowEvent::FocusLost), Disposition::Handled),

        WM_MOUSEWHEEL => {
            let delta = hiword(wparam) as i16;
            Translated::new(Some(WindowEvent::MouseWheel { delta }), Disposition::Handled)
        }

        WM_SYSCOMMAND => match wparam & SC_MASK {
            // WM_SIZE arrives after this and carries the restored size.
            SC_RESTORE => Translated::new(Some(WindowEvent::RestoreRequested), Disposition::Default),
            // Alt would otherwise open the system menu and steal input.
            SC_KEYMENU => Translated::new(None, Disposition::Handled),
            _ => Translated::passthrough(),
        },

        WM_SIZE => {
            let lp = lparam as usize;
            let event = WindowEvent::Resized {
                width: u32::from(loword(lp)),
                height: u32::from(hiword(lp)),
                kind: size_kind(wparam),
            };
            Translated::new(Some(event), Disposition::Default)
        }

        WM_ENTERSIZEMOVE => Translated::new(Some(WindowEvent::EnterSizeMove), Disposition::Default),
        WM_EXITSIZEMOVE => Translated::new(Some(WindowEvent::ExitSizeMove), Disposition::Default),

        _ => Translated::passthrough(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lparam(low: u16, high: u16) -> isize {
        ((high as usize) << 16 | low as usize) as isize
    }

    #[test]
    fn size_message_unpacks_client_size() {
        let t = translate(WM_SIZE, SIZE_MAXIMIZED, make_lparam(1920, 1017));
        assert_eq!(
            t.event,
            Some(WindowEvent::Resized {
                width: 1920,
                height: 1017,
                kind: SizeKind::Maximized,
            })
        );
        assert_eq!(t.disposition, Disposition::Default);
    }

    #[test]
    fn size_message_kinds() {
        let kind = |wparam| match translate(WM_SIZE, wparam, 0).event {
            Some(WindowEvent::Resized { kind, .. }) => kind,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(kind(SIZE_RESTORED), SizeKind::Restored);
        assert_eq!(kind(SIZE_MINIMIZED), SizeKind::Minimized);
        assert_eq!(kind(SIZE_MAXSHOW), SizeKind::MaxShow);
        assert_eq!(kind(SIZE_MAXHIDE), SizeKind::MaxHide);
    }

    #[test]
    fn wheel_delta_is_signed_high_word() {
        let down = (0xFF88usize) << 16; // -120
        assert_eq!(
            translate(WM_MOUSEWHEEL, down, 0).event,
            Some(WindowEvent::MouseWheel { delta: -120 })
        );
        let up = 120usize << 16 | 0x0008; // MK_CONTROL in the low word
        assert_eq!(
            translate(WM_MOUSEWHEEL, up, 0).event,
            Some(WindowEvent::MouseWheel { delta: 120 })
        );
    }

    #[test]
    fn close_posts_quit() {
        let t = translate(WM_CLOSE, 0, 0);
        assert_eq!(t.event, Some(WindowEvent::CloseRequested));
        assert_eq!(t.disposition, Disposition::Quit);
    }

    #[test]
    fn syscommand_restore_and_keymenu() {
        let restore = translate(WM_SYSCOMMAND, SC_RESTORE | 0x2, 0);
        assert_eq!(restore.event, Some(WindowEvent::RestoreRequested));
        assert_eq!(restore.disposition, Disposition::Default);

        let keymenu = translate(WM_SYSCOMMAND, SC_KEYMENU, 0);
        assert_eq!(keymenu.event, None);
        assert_eq!(keymenu.disposition, Disposition::Handled);
    }

    #[test]
    fn focus_changes_are_handled() {
        let gained = translate(WM_SETFOCUS, 0, 0);
        assert_eq!(gained.event, Some(WindowEvent::FocusGained));
        assert_eq!(gained.disposition, Disposition::Handled);

        let lost = translate(WM_KILLFOCUS, 0, 0);
        assert_eq!(lost.event, Some(WindowEvent::FocusLost));
        assert_eq!(lost.disposition, Disposition::Handled);
    }

    #[test]
    fn size_move_loop_reaches_default_proc() {
        let enter = translate(WM_ENTERSIZEMOVE, 0, 0);
        assert_eq!(enter.event, Some(WindowEvent::EnterSizeMove));
        assert_eq!(enter.disposition, Disposition::Default);

        let exit = translate(WM_EXITSIZEMOVE, 0, 0);
        assert_eq!(exit.event, Some(WindowEvent::ExitSizeMove));
        assert_eq!(exit.disposition, Disposition::Default);
    }

    #[test]
    fn other_syscommands_pass_through() {
        let t = translate(WM_SYSCOMMAND, 0xF030, 0); // SC_MAXIMIZE
        assert_eq!(t, Translated::passthrough());
    }

    #[test]
    fn unknown_messages_pass_through() {
        let t = translate(0x000F, 0, 0); // WM_PAINT
        assert_eq!(t, Translated::passthrough());
    }
}

#[cfg(all(test, target_os = "windows"))]
mod win32_tests {
    use windows::Win32::UI::WindowsAndMessaging as wm;

    #[test]
    fn message_ids_match_win32() {
        assert_eq!(super::WM_SIZE, wm::WM_SIZE);
        assert_eq!(super::WM_SETFOCUS, wm::WM_SETFOCUS);
        assert_eq!(super::WM_KILLFOCUS, wm::WM_KILLFOCUS);
        assert_eq!(super::WM_CLOSE, wm::WM_CLOSE);
        assert_eq!(super::WM_SYSCOMMAND, wm::WM_SYSCOMMAND);
        assert_eq!(super::WM_MOUSEWHEEL, wm::WM_MOUSEWHEEL);
        assert_eq!(super::WM_ENTERSIZEMOVE, wm::WM_ENTERSIZEMOVE);
        assert_eq!(super::WM_EXITSIZEMOVE, wm::WM_EXITSIZEMOVE);
    }

    #[test]
    fn request_types_match_win32() {
        assert_eq!(super::SC_KEYMENU, wm::SC_KEYMENU as usize);
        assert_eq!(super::SC_RESTORE, wm::SC_RESTORE as usize);
        assert_eq!(super::SIZE_RESTORED, wm::SIZE_RESTORED as usize);
        assert_eq!(super::SIZE_MINIMIZED, wm::SIZE_MINIMIZED as usize);
        assert_eq!(super::SIZE_MAXIMIZED, wm::SIZE_MAXIMIZED as usize);
        assert_eq!(super::SIZE_MAXSHOW, wm::SIZE_MAXSHOW as usize);
        assert_eq!(super::SIZE_MAXHIDE, wm::SIZE_MAXHIDE as usize);
    }
}
