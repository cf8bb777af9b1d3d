// SPDX-License-Identifier: GPL-3.0-only

//! Encoder selection for AVI recordings

use crate::constants::pipeline as tuning;
use crate::errors::RecordingError;
use tracing::{debug, info};

/// Target bitrate for MPEG-4 Part 2 recordings, in bits per second
const MPEG4_BITRATE: &str = "4000000";

/// Quality of the Motion-JPEG fallback (0-100)
const MJPEG_QUALITY: &str = "85";

/// A video encoder that is installed on this system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedEncoder {
    pub element: &'static str,
}

impl SelectedEncoder {
    /// Create the encoder element with its recording settings applied
    pub fn build(&self) -> Result<gstreamer::Element, RecordingError> {
        use gstreamer::prelude::*;

        let encoder = gstreamer::ElementFactory::make(self.element)
            .name("encoder")
            .build()
            .map_err(|e| RecordingError::StartFailed(format!("{}: {}", self.element, e)))?;

        if encoder.has_property("bitrate") {
            encoder.set_property_from_str("bitrate", MPEG4_BITRATE);
        } else if encoder.has_property("quality") {
            encoder.set_property_from_str("quality", MJPEG_QUALITY);
        }
        Ok(encoder)
    }
}

/// Pick the first available encoder from a preference list
///
/// `is_available` is injected so the preference order can be tested
/// without a GStreamer registry.
pub fn select_from(
    candidates: &[&'static str],
    is_available: impl Fn(&str) -> bool,
) -> Result<SelectedEncoder, RecordingError> {
    for element in candidates {
        if is_available(element) {
            info!(encoder = element, "Selected video encoder");
            return Ok(SelectedEncoder { element });
        }
        debug!(encoder = element, "Video encoder not installed");
    }
    Err(RecordingError::EncoderNotAvailable)
}

/// Pick the preferred installed encoder (MPEG-4 Part 2, then Motion-JPEG)
pub fn select_video_encoder() -> Result<SelectedEncoder, RecordingError> {
    select_from(tuning::VIDEO_ENCODERS, |name| {
        gstreamer::ElementFactory::find(name).is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_available_wins() {
        let chosen = select_from(&["a", "b", "c"], |name| name != "a").unwrap();
        assert_eq!(chosen.element, "b");
    }

    #[test]
    fn test_nothing_available() {
        assert_eq!(
            select_from(&["a"], |_| false).unwrap_err(),
            RecordingError::EncoderNotAvailable
        );
    }
}
