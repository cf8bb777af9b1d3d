// SPDX-License-Identifier: GPL-3.0-only

//! Frame conversion for display and encoding

use crate::backends::camera::{Frame, PixelFormat};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use std::path::Path;
use tracing::debug;

/// RGBA pixels ready to hand to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Convert a camera frame to an RGB image, swapping channels for BGR input
pub fn to_rgb(frame: &Frame) -> Option<RgbImage> {
    if !frame.is_valid() {
        return None;
    }

    let mut pixels = frame.data.to_vec();
    if frame.format == PixelFormat::Bgr {
        for px in pixels.chunks_exact_mut(Frame::BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
    }
    RgbImage::from_raw(frame.width, frame.height, pixels)
}

/// Convert a frame and stretch it to exactly `target` pixels
///
/// `None` for `target` keeps the frame's native size. Zero-sized targets
/// are clamped to one pixel.
pub fn scale_for_display(frame: &Frame, target: Option<(u32, u32)>) -> Option<DisplayImage> {
    let rgb = to_rgb(frame)?;
    let rgba = DynamicImage::ImageRgb8(rgb);

    let rgba = match target {
        Some((w, h)) if (w, h) != frame.dimensions() => {
            rgba.resize_exact(w.max(1), h.max(1), FilterType::Nearest)
        }
        _ => rgba,
    }
    .into_rgba8();

    Some(DisplayImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Load a photo from disk and fit it to the fixed gallery viewport
pub fn load_viewport_image(
    path: &Path,
    width: u32,
    height: u32,
) -> Result<DisplayImage, image::ImageError> {
    let img = image::open(path)?;
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Loaded gallery photo"
    );
    let rgba = img
        .resize_exact(width, height, FilterType::Triangle)
        .into_rgba8();

    Ok(DisplayImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bgr_pixel() -> Frame {
        Frame::new(1, 1, vec![10u8, 20, 30], PixelFormat::Bgr)
    }

    #[test]
    fn test_bgr_is_swapped() {
        let rgb = to_rgb(&bgr_pixel()).unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [30, 20, 10]);
    }

    #[test]
    fn test_rgb_passes_through() {
        let frame = Frame::new(1, 1, vec![10u8, 20, 30], PixelFormat::Rgb);
        assert_eq!(to_rgb(&frame).unwrap().get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_scale_to_target() {
        let frame = Frame::new(2, 2, vec![0u8; 12], PixelFormat::Bgr);
        let img = scale_for_display(&frame, Some((8, 4))).unwrap();
        assert_eq!((img.width, img.height), (8, 4));
        assert_eq!(img.rgba.len(), 8 * 4 * 4);
    }

    #[test]
    fn test_native_size_without_target() {
        let img = scale_for_display(&bgr_pixel(), None).unwrap();
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.rgba, vec![30, 20, 10, 255]);
    }

    #[test]
    fn test_invalid_frame_is_rejected() {
        let frame = Frame::new(2, 2, vec![0u8; 5], PixelFormat::Rgb);
        assert!(scale_for_display(&frame, None).is_none());
    }

    #[test]
    fn test_viewport_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo_1.jpg");
        RgbImage::new(40, 30).save(&path).unwrap();

        let img = load_viewport_image(&path, 800, 480).unwrap();
        assert_eq!((img.width, img.height), (800, 480));
        assert_eq!(img.rgba.len(), 800 * 480 * 4);
    }
}
