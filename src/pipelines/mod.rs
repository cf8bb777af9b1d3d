// SPDX-License-Identifier: GPL-3.0-only

//! Capture pipelines for photos and videos
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │  JPEG File   │
//! │  (BGR/RGB)   │     │  - still select   │     │              │
//! │              │     │  - JPEG encoding  │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//!
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Video Recorder   │ ──▶ │   AVI File   │
//! │  (per tick)  │     │  - appsrc         │     │              │
//! │              │     │  - MPEG-4 / MJPEG │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! - [`photo`]: still selection and JPEG encoding
//! - [`video`]: frame-fed AVI recording through GStreamer

pub mod photo;
pub mod video;
