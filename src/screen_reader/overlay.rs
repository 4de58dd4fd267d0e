//! Debug visualisation of detections. Never feeds back into the cycle.

use image::DynamicImage;

use crate::geometry::Rect;

/// Shows what the detector saw on the latest frame
pub trait DebugOverlay {
    /// Render a frame with the detected box, or `None` when nothing was found.
    /// Implementations swallow their own failures.
    fn render(&mut self, image: &DynamicImage, bbox: Option<&Rect>);
}

impl<T: DebugOverlay + ?Sized> DebugOverlay for Box<T> {
    fn render(&mut self, image: &DynamicImage, bbox: Option<&Rect>) {
        (**self).render(image, bbox)
    }
}

/// Writes each render as a trace event
#[derive(Debug, Default)]
pub struct TracingOverlay {
    frames: u64,
}

impl TracingOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DebugOverlay for TracingOverlay {
    fn render(&mut self, image: &DynamicImage, bbox: Option<&Rect>) {
        self.frames += 1;
        match bbox {
            Some(b) => tracing::trace!(
                "[OVERLAY] frame #{} {}x{} bobber {} center {}",
                self.frames,
                image.width(),
                image.height(),
                b,
                b.center()
            ),
            None => tracing::trace!(
                "[OVERLAY] frame #{} {}x{} no detection",
                self.frames,
                image.width(),
                image.height()
            ),
        }
    }
}

#[cfg(feature = "vision")]
pub use highgui_overlay::OpenCvOverlay;

#[cfg(feature = "vision")]
mod highgui_overlay {
    use image::DynamicImage;
    use opencv::{
        core::{Mat, Scalar, CV_8UC3},
        highgui, imgproc,
        prelude::*,
    };

    use super::DebugOverlay;
    use crate::geometry::Rect;

    const WINDOW_NAME: &str = "bobber-sentinel";
    /// Half-width of the centre marker in pixels
    const CENTER_MARKER: f64 = 2.0;

    /// Draws the detection into a HighGUI window
    #[derive(Debug, Default)]
    pub struct OpenCvOverlay;

    impl OpenCvOverlay {
        pub fn new() -> Self {
            Self
        }

        fn to_bgr_mat(image: &DynamicImage) -> opencv::Result<Mat> {
            let rgb = image.to_rgb8();
            let (width, height) = (rgb.width() as i32, rgb.height() as i32);
            let step = width as usize * 3;
            let mat = unsafe {
                Mat::new_rows_cols_with_data_unsafe(
                    height,
                    width,
                    CV_8UC3,
                    rgb.as_raw().as_ptr() as *mut std::ffi::c_void,
                    step,
                )?
            };
            let mut bgr = Mat::default();
            imgproc::cvt_color(&mat, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
            Ok(bgr)
        }

        fn cv_rect(rect: &Rect) -> opencv::core::Rect {
            opencv::core::Rect::new(
                rect.x1.round() as i32,
                rect.y1.round() as i32,
                rect.width().round().max(1.0) as i32,
                rect.height().round().max(1.0) as i32,
            )
        }

        fn draw(&self, image: &DynamicImage, bbox: Option<&Rect>) -> opencv::Result<()> {
            let mut mat = Self::to_bgr_mat(image)?;

            if let Some(b) = bbox {
                imgproc::rectangle(
                    &mut mat,
                    Self::cv_rect(b),
                    Scalar::new(128.0, 128.0, 255.0, 0.0),
                    1,
                    imgproc::LINE_8,
                    0,
                )?;
                if let Ok(marker) = Rect::from_point_and_expansion(b.center(), CENTER_MARKER) {
                    imgproc::rectangle(
                        &mut mat,
                        Self::cv_rect(&marker),
                        Scalar::new(0.0, 255.0, 0.0, 0.0),
                        imgproc::FILLED,
                        imgproc::LINE_8,
                        0,
                    )?;
                }
            }

            highgui::imshow(WINDOW_NAME, &mat)?;
            highgui::wait_key(1)?;
            Ok(())
        }
    }

    impl DebugOverlay for OpenCvOverlay {
        fn render(&mut self, image: &DynamicImage, bbox: Option<&Rect>) {
            if let Err(e) = self.draw(image, bbox) {
                tracing::debug!("[OVERLAY] Failed to draw frame: {}", e);
            }
        }
    }
}
