//! Raw Win32 plumbing behind the [`super::NativeDesktop`] backend.

use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT, TRUE, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowRect, GetWindowTextW, IsIconic, IsWindowVisible,
    PostMessageW, SetForegroundWindow, ShowWindow, SHOW_WINDOW_CMD, SW_MINIMIZE, SW_RESTORE,
    SW_SHOWMAXIMIZED, WM_CLOSE,
};

use super::WindowRef;
use crate::errors::{VdResult, VoiceDeskError};

unsafe extern "system" fn enum_windows_cb(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let vec = &mut *(lparam.0 as *mut Vec<isize>);
    vec.push(hwnd.0 as isize);
    TRUE
}

fn collect_handles() -> Vec<isize> {
    let mut handles: Vec<isize> = Vec::new();
    unsafe {
        let _ = EnumWindows(
            Some(enum_windows_cb),
            LPARAM(&mut handles as *mut Vec<isize> as isize),
        );
    }
    handles
}

fn hwnd(raw: isize) -> HWND {
    HWND(raw as *mut _)
}

fn window_ref(raw: isize) -> Option<WindowRef> {
    unsafe {
        let h = hwnd(raw);
        let mut buf = [0u16; 256];
        let len = GetWindowTextW(h, &mut buf);
        if len == 0 {
            return None;
        }
        let title = String::from_utf16_lossy(&buf[..len as usize]);

        let mut rect = RECT::default();
        let _ = GetWindowRect(h, &mut rect);
        let width = (rect.right - rect.left).max(0) as u32;
        let height = (rect.bottom - rect.top).max(0) as u32;

        Some(WindowRef {
            title,
            handle: Some(raw),
            visible: IsWindowVisible(h).as_bool(),
            minimized: IsIconic(h).as_bool(),
            width,
            height,
        })
    }
}

pub fn enumerate_windows() -> Vec<WindowRef> {
    collect_handles().into_iter().filter_map(window_ref).collect()
}

pub fn foreground_window() -> Option<WindowRef> {
    let raw = unsafe { GetForegroundWindow() }.0 as isize;
    if raw == 0 {
        return None;
    }
    window_ref(raw)
}

pub fn is_minimized(raw: isize) -> bool {
    unsafe { IsIconic(hwnd(raw)).as_bool() }
}

pub fn restore(raw: isize) {
    unsafe {
        let _ = ShowWindow(hwnd(raw), SW_RESTORE);
    }
}

pub fn minimize(raw: isize) {
    show(raw, SW_MINIMIZE)
}

pub fn maximize(raw: isize) {
    show(raw, SW_SHOWMAXIMIZED)
}

fn show(raw: isize, cmd: SHOW_WINDOW_CMD) {
    unsafe {
        let _ = ShowWindow(hwnd(raw), cmd);
    }
}

pub fn set_foreground(raw: isize) -> bool {
    unsafe { SetForegroundWindow(hwnd(raw)).as_bool() }
}

pub fn post_close(raw: isize) -> VdResult<()> {
    unsafe {
        PostMessageW(hwnd(raw), WM_CLOSE, WPARAM(0), LPARAM(0))
            .map_err(|e| VoiceDeskError::Desktop(format!("WM_CLOSE post failed: {e}")))
    }
}
