// SPDX-License-Identifier: GPL-3.0-only

//! Pixel conversion between camera frames, the screen and image files
//!
//! Camera frames arrive as packed 24-bit BGR (webcam) or RGB (camera module).
//! The display needs RGBA at the size of the preview area, and the gallery
//! needs JPEG files decoded and fitted to its viewport.

pub mod convert;

pub use convert::{DisplayImage, load_viewport_image, scale_for_display, to_rgb};
