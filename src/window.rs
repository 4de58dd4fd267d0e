//! Game window lookup and focus using the Windows API

#[cfg(windows)]
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT};
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowRect, GetWindowTextW, IsWindow, IsWindowVisible, SetForegroundWindow,
    ShowWindow, SW_SHOW,
};

use crate::geometry::Point;

/// A located game window: its title, screen rectangle and native id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle {
    pub title: String,
    /// Screen rectangle (x1, y1, x2, y2)
    pub rect: (i32, i32, i32, i32),
    pub raw: isize,
}

impl WindowHandle {
    pub fn width(&self) -> u32 {
        (self.rect.2 - self.rect.0).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.rect.3 - self.rect.1).max(0) as u32
    }

    /// Convert a point in captured-frame pixels to absolute screen pixels
    pub fn to_screen(&self, point: Point) -> (i32, i32) {
        (
            self.rect.0 + point.x.round() as i32,
            self.rect.1 + point.y.round() as i32,
        )
    }
}

/// First window whose title contains `needle`
pub fn pick_window<'a>(windows: &'a [(isize, String)], needle: &str) -> Option<&'a (isize, String)> {
    windows.iter().find(|(_, title)| title.contains(needle))
}

#[cfg(windows)]
unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam.0 as *mut Vec<(isize, String)>);
    if IsWindowVisible(hwnd).as_bool() {
        let mut buf = [0u16; 512];
        let len = GetWindowTextW(hwnd, &mut buf);
        if len > 0 {
            windows.push((hwnd.0 as isize, String::from_utf16_lossy(&buf[..len as usize])));
        }
    }
    BOOL(1)
}

/// Find the game window whose title contains `title`
#[cfg(windows)]
pub fn find_window(title: &str) -> Option<WindowHandle> {
    let mut windows: Vec<(isize, String)> = Vec::new();

    unsafe {
        if let Err(e) = EnumWindows(
            Some(collect_window),
            LPARAM(&mut windows as *mut Vec<(isize, String)> as isize),
        ) {
            tracing::warn!("[WINDOW] EnumWindows failed: {:?}", e);
            return None;
        }
    }

    let (raw, full_title) = pick_window(&windows, title)?.clone();
    let rect = get_window_rect(raw)?;
    Some(WindowHandle {
        title: full_title,
        rect,
        raw,
    })
}

#[cfg(not(windows))]
pub fn find_window(_title: &str) -> Option<WindowHandle> {
    tracing::warn!("Window finding not implemented on this platform");
    None
}

/// Get window rectangle (x1, y1, x2, y2) for a native id
#[cfg(windows)]
pub fn get_window_rect(raw: isize) -> Option<(i32, i32, i32, i32)> {
    let hwnd = HWND(raw as *mut std::ffi::c_void);
    let mut rect = RECT::default();
    unsafe {
        if GetWindowRect(hwnd, &mut rect).is_ok() {
            Some((rect.left, rect.top, rect.right, rect.bottom))
        } else {
            None
        }
    }
}

#[cfg(not(windows))]
pub fn get_window_rect(_raw: isize) -> Option<(i32, i32, i32, i32)> {
    tracing::warn!("Window rect not implemented on this platform");
    None
}

/// Bring the window to the foreground. Returns false if it is gone or
/// refused focus.
#[cfg(windows)]
pub fn focus_window(window: &WindowHandle) -> bool {
    let hwnd = HWND(window.raw as *mut std::ffi::c_void);
    unsafe {
        if !IsWindow(hwnd).as_bool() {
            return false;
        }
        let _ = ShowWindow(hwnd, SW_SHOW);
        SetForegroundWindow(hwnd).as_bool()
    }
}

#[cfg(not(windows))]
pub fn focus_window(_window: &WindowHandle) -> bool {
    tracing::warn!("Window focusing not implemented on this platform");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_window_substring() {
        let windows = vec![
            (1, "Task Manager".to_string()),
            (2, "World of Warcraft".to_string()),
            (3, "World of Warcraft - PTR".to_string()),
        ];
        assert_eq!(pick_window(&windows, "Warcraft").map(|w| w.0), Some(2));
        assert!(pick_window(&windows, "Notepad").is_none());
    }

    #[test]
    fn test_to_screen() {
        let window = WindowHandle {
            title: "game".to_string(),
            rect: (100, 50, 900, 650),
            raw: 0,
        };
        assert_eq!(window.width(), 800);
        assert_eq!(window.height(), 600);
        assert_eq!(window.to_screen(Point::new(10.4, 20.6)), (110, 71));
    }

    #[test]
    #[cfg(not(windows))]
    fn test_find_window_unsupported() {
        assert!(find_window("NonExistentWindow12345").is_none());
    }
}
