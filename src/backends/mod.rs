// SPDX-License-Identifier: GPL-3.0-only

//! Hardware access layer
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │              App Layer                │
//! └──────────────────┬────────────────────┘
//!                    │ CameraSource
//! ┌──────────────────┴────────────────────┐
//! │   Webcam (V4L2)   │  Camera module    │
//! │                   │  (libcamera)      │
//! └───────────────────────────────────────┘
//! ```

pub mod camera;
