// SPDX-License-Identifier: GPL-3.0-only

//! Touchcam - a touchscreen camera application for single-board computers
//!
//! Live preview, photos after a 3-2-1 countdown, AVI video recording and a
//! gallery of saved photos, on top of a USB webcam or a board camera module.
//!
//! # Architecture
//!
//! - [`app`]: cosmic application, controller, countdown and gallery
//! - [`backends`]: camera sources
//! - [`media`]: frame conversion and scaling
//! - [`pipelines`]: photo (JPEG) and video (AVI) writing
//! - [`storage`]: storage root discovery and media file naming
//! - [`config`]: user configuration handling

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod media;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Controller, Flags, Message};
pub use backends::camera::{CameraBackendType, CameraSource, Frame, PixelFormat, StillMode};
pub use config::Config;
pub use errors::{AppError, AppResult};
