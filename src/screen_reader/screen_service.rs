//! Screen capture service

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use image::DynamicImage;

use crate::error::CaptureError;
use crate::window::{find_window, WindowHandle};

/// A captured image of the game window and the window it came from
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: DynamicImage,
    pub window: WindowHandle,
}

/// Produces frames of the game window on demand
pub trait FrameSource {
    /// Capture the target window. `CaptureError::WindowNotFound` means the
    /// window is gone for good; any other error only costs this frame.
    fn capture(&mut self) -> Result<Frame, CaptureError>;
}

/// Region for screenshot capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// The screen area covered by a window
    pub fn of_window(window: &WindowHandle) -> Self {
        Self {
            left: window.rect.0,
            top: window.rect.1,
            width: window.width(),
            height: window.height(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Captures the game window found by title
pub struct ScreenService {
    window_title: String,
    retries: u32,
    retry_delay: Duration,
}

impl ScreenService {
    /// Create a new screen service. The window is looked up `retries` times,
    /// `retry_delay` apart, before it is declared missing.
    pub fn new(window_title: impl Into<String>, retries: u32, retry_delay: Duration) -> Self {
        Self {
            window_title: window_title.into(),
            retries: retries.max(1),
            retry_delay,
        }
    }

    /// Locate the target window, retrying a bounded number of times
    pub fn locate_window(&self) -> Option<WindowHandle> {
        for i in 0..self.retries {
            if let Some(window) = find_window(&self.window_title) {
                return Some(window);
            }
            tracing::warn!(
                "[CAPTURE] Window '{}' not found. Retrying ({}/{})",
                self.window_title,
                i + 1,
                self.retries
            );
            if i + 1 < self.retries {
                thread::sleep(self.retry_delay);
            }
        }
        None
    }

    /// Take a screenshot safely with retries
    pub fn safe_screenshot(&self, region: Region) -> Option<DynamicImage> {
        for i in 0..self.retries {
            match capture_region(region) {
                Ok(img) => return Some(img),
                Err(e) => {
                    tracing::warn!(
                        "[CAPTURE] Screenshot failed: {:#}. Retrying ({}/{})",
                        e,
                        i + 1,
                        self.retries
                    );
                    thread::sleep(self.retry_delay);
                }
            }
        }
        None
    }
}

impl FrameSource for ScreenService {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        let window = self
            .locate_window()
            .ok_or_else(|| CaptureError::WindowNotFound(self.window_title.clone()))?;

        let region = Region::of_window(&window);
        if region.is_empty() {
            return Err(CaptureError::Failed(format!(
                "window '{}' has an empty rect {:?}",
                window.title, window.rect
            )));
        }

        let image = self
            .safe_screenshot(region)
            .ok_or_else(|| CaptureError::Failed(format!("could not capture {:?}", region)))?;

        Ok(Frame { image, window })
    }
}

/// Capture a screen region of the primary screen
#[cfg(windows)]
fn capture_region(region: Region) -> Result<DynamicImage> {
    use screenshots::Screen;

    let screens = Screen::all().context("Failed to get screens")?;
    let screen = screens.first().context("No screens found")?;

    let image = screen
        .capture_area(region.left, region.top, region.width, region.height)
        .context("Failed to capture area")?;

    let rgba_image = image::RgbaImage::from_raw(image.width(), image.height(), image.to_vec())
        .context("Failed to create image from raw data")?;

    Ok(DynamicImage::ImageRgba8(rgba_image))
}

#[cfg(not(windows))]
fn capture_region(region: Region) -> Result<DynamicImage> {
    Err(anyhow::anyhow!("Screen capture not implemented on this platform"))
        .with_context(|| format!("capturing {:?}", region))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(rect: (i32, i32, i32, i32)) -> WindowHandle {
        WindowHandle {
            title: "game".to_string(),
            rect,
            raw: 0,
        }
    }

    #[test]
    fn test_region_of_window() {
        let region = Region::of_window(&window((100, 200, 500, 600)));
        assert_eq!(region.left, 100);
        assert_eq!(region.top, 200);
        assert_eq!(region.width, 400);
        assert_eq!(region.height, 400);
        assert!(!region.is_empty());
    }

    #[test]
    fn test_region_of_inverted_window_is_empty() {
        let region = Region::of_window(&window((500, 600, 100, 200)));
        assert_eq!(region.width, 0);
        assert_eq!(region.height, 0);
        assert!(region.is_empty());
    }

    #[test]
    fn test_screen_service_retries_at_least_once() {
        let service = ScreenService::new("game", 0, Duration::ZERO);
        assert_eq!(service.retries, 1);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_missing_window_is_fatal() {
        let mut service = ScreenService::new("NonExistentWindow12345", 2, Duration::ZERO);
        let err = service.capture().unwrap_err();
        assert!(err.is_fatal());
    }
}
