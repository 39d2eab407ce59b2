//! Win32 window and message trampoline
//!
//! The window procedure never reaches the adapter. It recovers the window's
//! [`MessageQueue`] from `GWLP_USERDATA`, records the translated event and
//! answers the OS; the adapter drains the queue once the pump returns. This
//! keeps `DispatchMessageW` re-entrancy (including the modal size/move loop)
//! away from any `&mut` borrow of the adapter.

use std::cell::RefCell;
use std::ffi::c_void;
use std::ptr::NonNull;

use log::{debug, warn};
use windows::Win32::Foundation::{GetLastError, HMODULE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{CREATESTRUCTW, WM_NCCREATE, WM_NCDESTROY, WNDCLASSW};
use windows::core::PCWSTR;

use super::win_api;
use crate::config::FlatscreenSettings;
use crate::error::InitError;
use crate::platform::events::WindowEvent;
use crate::platform::message::{self, Disposition};
use crate::types::WindowHandle;

/// Events recorded by the window procedure between pumps.
#[derive(Debug, Default)]
pub struct MessageQueue {
    pending: RefCell<Vec<WindowEvent>>,
}

impl MessageQueue {
    /// Handle one native message on behalf of the window.
    fn on_message(&self, hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
        let translated = message::translate(msg, wparam.0, lparam.0);
        if let Some(event) = translated.event {
            self.pending.borrow_mut().push(event);
        }

        match translated.disposition {
            Disposition::Default => win_api::def_window_proc(hwnd, msg, wparam, lparam),
            Disposition::Handled => LRESULT(0),
            Disposition::Quit => {
                win_api::quit_message_loop(0);
                LRESULT(0)
            }
        }
    }

    fn drain_into(&self, events: &mut Vec<WindowEvent>) {
        events.append(&mut self.pending.borrow_mut());
    }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
        win_api::set_window_user_data(hwnd, create_struct.lpCreateParams as isize);
        return win_api::def_window_proc(hwnd, msg, wparam, lparam);
    }

    let ptr = win_api::get_window_user_data(hwnd) as *const MessageQueue;
    if ptr.is_null() {
        return win_api::def_window_proc(hwnd, msg, wparam, lparam);
    }
    if msg == WM_NCDESTROY {
        win_api::set_window_user_data(hwnd, 0);
        return win_api::def_window_proc(hwnd, msg, wparam, lparam);
    }

    // SAFETY: the queue outlives the window; Win32Window frees it only after
    // DestroyWindow has delivered WM_NCDESTROY.
    let queue = unsafe { &*ptr };
    queue.on_message(hwnd, msg, wparam, lparam)
}

/// Native top-level window owned by the adapter.
pub struct Win32Window {
    hwnd: HWND,
    instance: HMODULE,
    class_name: Vec<u16>,
    queue: NonNull<MessageQueue>,
}

impl Win32Window {
    /// Register the window class and create the window.
    ///
    /// The display name is both the class name and the title.
    pub fn create(settings: &FlatscreenSettings) -> Result<Self, InitError> {
        let instance =
            win_api::get_module_handle().map_err(|e| InitError::WindowClass(format!("{e:?}")))?;
        let class_name = win_api::to_wide_chars(&settings.display_name);
        let cursor =
            win_api::load_cursor_arrow().map_err(|e| InitError::WindowClass(format!("{e:?}")))?;

        let window_class = WNDCLASSW {
            lpfnWndProc: Some(window_proc),
            hInstance: instance.into(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hCursor: cursor,
            ..Default::default()
        };

        if win_api::register_class(&window_class) == 0 {
            let code = unsafe { GetLastError() };
            return Err(InitError::WindowClass(format!(
                "RegisterClassW('{}') failed: {:?}",
                settings.display_name, code
            )));
        }

        let queue = NonNull::from(Box::leak(Box::new(MessageQueue::default())));

        let hwnd = win_api::create_overlapped_window(
            instance,
            PCWSTR(class_name.as_ptr()),
            PCWSTR(class_name.as_ptr()),
            settings.pos_x,
            settings.pos_y,
            settings.width as i32,
            settings.height as i32,
            Some(queue.as_ptr().cast::<c_void>() as *const c_void),
        );

        let hwnd = match hwnd {
            Ok(hwnd) => hwnd,
            Err(e) => {
                // SAFETY: no window holds the pointer.
                drop(unsafe { Box::from_raw(queue.as_ptr()) });
                let _ = win_api::unregister_class(PCWSTR(class_name.as_ptr()), instance);
                return Err(InitError::Window(format!("{e:?}")));
            }
        };

        debug!(
            "created window '{}' at ({}, {})",
            settings.display_name, settings.pos_x, settings.pos_y
        );

        Ok(Self {
            hwnd,
            instance,
            class_name,
            queue,
        })
    }

    /// Dispatch queued native messages and collect the resulting events.
    pub fn pump(&mut self, events: &mut Vec<WindowEvent>) {
        win_api::drain_message_queue();
        // SAFETY: owned by self until drop.
        unsafe { self.queue.as_ref() }.drain_into(events);
    }

    #[inline]
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    #[inline]
    pub fn handle(&self) -> WindowHandle {
        WindowHandle::from_raw(self.hwnd.0 as usize)
    }
}

impl Drop for Win32Window {
    fn drop(&mut self) {
        if let Err(e) = win_api::destroy_window(self.hwnd) {
            warn!("DestroyWindow failed: {e:?}");
            win_api::set_window_user_data(self.hwnd, 0);
        }
        let _ = win_api::unregister_class(PCWSTR(self.class_name.as_ptr()), self.instance);
        // SAFETY: the window no longer references the queue.
        drop(unsafe { Box::from_raw(self.queue.as_ptr()) });
    }
}
