//! Bobber detection on captured frames

use image::DynamicImage;

use crate::error::DetectError;

/// Locates the bobber in a frame.
///
/// Returns the raw box corners `[x1, y1, x2, y2]` in frame pixels, or
/// `None` when nothing was found. Callers validate the corners.
pub trait Detector {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<[f64; 4]>, DetectError>;
}

impl<T: Detector + ?Sized> Detector for Box<T> {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<[f64; 4]>, DetectError> {
        (**self).detect(image)
    }
}

#[cfg(feature = "vision")]
pub use template::TemplateDetector;

#[cfg(feature = "vision")]
mod template {
    use std::path::Path;

    use image::{DynamicImage, GrayImage};
    use opencv::{
        core::{min_max_loc, no_array, Mat, MatTraitConst, Point, CV_8UC1},
        imgcodecs, imgproc,
        prelude::*,
    };

    use super::Detector;
    use crate::error::DetectError;

    /// Finds the bobber by normalized cross-correlation against a template
    pub struct TemplateDetector {
        template: Mat,
        threshold: f32,
    }

    impl TemplateDetector {
        /// Load the grayscale template image from `path`
        pub fn new(path: &Path, threshold: f32) -> Result<Self, DetectError> {
            let template_err = |reason: String| DetectError::Template {
                path: path.display().to_string(),
                reason,
            };

            let path_str = path
                .to_str()
                .ok_or_else(|| template_err("non-UTF8 path".to_string()))?;
            let template = imgcodecs::imread(path_str, imgcodecs::IMREAD_GRAYSCALE)
                .map_err(|e| template_err(e.to_string()))?;
            if template.empty() {
                return Err(template_err("template not found or empty".to_string()));
            }

            tracing::info!(
                "[DETECT] Loaded template {:?} ({}x{}), threshold={:.2}",
                path,
                template.cols(),
                template.rows(),
                threshold
            );
            Ok(Self { template, threshold })
        }

        /// Convert image::GrayImage to an owned OpenCV Mat
        pub(crate) fn gray_image_to_mat(img: &GrayImage) -> opencv::Result<Mat> {
            let (width, height) = (img.width() as i32, img.height() as i32);
            let data = img.as_raw();

            // One byte per pixel for CV_8UC1
            let step = width as usize;
            let mat = unsafe {
                Mat::new_rows_cols_with_data_unsafe(
                    height,
                    width,
                    CV_8UC1,
                    data.as_ptr() as *mut std::ffi::c_void,
                    step,
                )?
            };

            // The borrowed buffer belongs to `img`; clone so the Mat owns its data
            Ok(mat.clone())
        }

        fn best_match(&self, img_mat: &Mat) -> opencv::Result<(f64, Point)> {
            let mut result = Mat::default();
            imgproc::match_template(
                img_mat,
                &self.template,
                &mut result,
                imgproc::TM_CCOEFF_NORMED,
                &no_array(),
            )?;

            let mut max_val = 0.0;
            let mut max_loc = Point::new(0, 0);
            min_max_loc(
                &result,
                None,
                Some(&mut max_val),
                None,
                Some(&mut max_loc),
                &no_array(),
            )?;
            Ok((max_val, max_loc))
        }
    }

    impl Detector for TemplateDetector {
        fn detect(&mut self, image: &DynamicImage) -> Result<Option<[f64; 4]>, DetectError> {
            let img_gray = image.to_luma8();
            let img_mat = Self::gray_image_to_mat(&img_gray)
                .map_err(|e| DetectError::Inference(e.to_string()))?;

            if self.template.cols() >= img_mat.cols() || self.template.rows() >= img_mat.rows() {
                tracing::trace!("[DETECT] Template larger than frame, skipping");
                return Ok(None);
            }

            let (score, loc) = self
                .best_match(&img_mat)
                .map_err(|e| DetectError::Inference(e.to_string()))?;

            if score >= self.threshold as f64 {
                let x1 = loc.x as f64;
                let y1 = loc.y as f64;
                let bbox = [
                    x1,
                    y1,
                    x1 + self.template.cols() as f64,
                    y1 + self.template.rows() as f64,
                ];
                tracing::trace!("[DETECT] bobber at {:?} score={:.3}", bbox, score);
                return Ok(Some(bbox));
            }

            tracing::trace!(
                "[DETECT] NOT FOUND - score={:.3} < threshold={:.2}",
                score,
                self.threshold
            );
            Ok(None)
        }
    }

}
