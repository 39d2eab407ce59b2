use std::{ffi::OsStr, ffi::c_void, iter::once, os::windows::ffi::OsStrExt};

use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

#[inline]
pub fn get_window_user_data(hwnd: HWND) -> isize {
    unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) }
}

#[inline]
pub fn set_window_user_data(hwnd: HWND, data: isize) -> isize {
    unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, data) }
}

#[inline]
pub fn def_window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

#[inline]
pub fn get_module_handle() -> windows::core::Result<HMODULE> {
    unsafe { GetModuleHandleW(None) }
}

#[inline]
pub fn load_cursor_arrow() -> windows::core::Result<HCURSOR> {
    unsafe { LoadCursorW(Some(HINSTANCE(std::ptr::null_mut())), IDC_ARROW) }
}

/// Register a window class. Returns the class atom, 0 on failure.
#[inline]
pub fn register_class(window_class: &WNDCLASSW) -> u16 {
    unsafe { RegisterClassW(window_class) }
}

#[inline]
pub fn unregister_class(class_name: PCWSTR, instance: HMODULE) -> windows::core::Result<()> {
    unsafe { UnregisterClassW(class_name, Some(instance.into())) }
}

/// Create a visible, resizable, title-barred top-level window.
#[allow(clippy::too_many_arguments)]
pub fn create_overlapped_window(
    instance: HMODULE,
    class_name: PCWSTR,
    title: PCWSTR,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    create_params: Option<*const c_void>,
) -> windows::core::Result<HWND> {
    unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            title,
            WS_OVERLAPPEDWINDOW | WS_VISIBLE,
            x,
            y,
            width,
            height,
            None,
            None,
            Some(instance.into()),
            create_params,
        )
    }
}

#[inline]
pub fn destroy_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe { DestroyWindow(hwnd) }
}

#[inline]
pub fn quit_message_loop(exit_code: i32) {
    unsafe {
        PostQuitMessage(exit_code);
    }
}

/// Dispatch every queued message for this thread without blocking.
pub fn drain_message_queue() {
    unsafe {
        let mut msg = MSG::default();
        while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

pub fn to_wide_chars(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(once(0)).collect()
}
