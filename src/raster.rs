//! Rasterization of composited labels.
//!
//! Labels are written as lossless PNG so that no font or vector layer
//! survives into the printed file.

use image::{ImageFormat, RgbImage};
use std::path::Path;

use crate::error::LabelError;

/// Write `image` as PNG.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<(), LabelError> {
    log::debug!("Writing PNG {}", path.display());
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| LabelError::Image(format!("Failed to save PNG {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_png_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.png");
        let mut img = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
        img.put_pixel(3, 7, Rgb([12, 34, 56]));

        write_png(&img, &path).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back, img);
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("label.png");
        let img = RgbImage::new(4, 4);
        assert!(matches!(write_png(&img, &path), Err(LabelError::Image(_))));
    }
}
