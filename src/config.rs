// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::CameraBackendType;
use crate::pipelines::photo::DEFAULT_JPEG_QUALITY;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

/// Capture device opened by the webcam backend when nothing is configured
pub const DEFAULT_DEVICE_PATH: &str = "/dev/video0";

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Camera backend to open at startup
    pub backend: CameraBackendType,
    /// V4L2 device for the webcam backend
    pub device_path: String,
    /// JPEG quality for saved photos (1-100)
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: CameraBackendType::default(),
            device_path: DEFAULT_DEVICE_PATH.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_open_first_webcam() {
        let config = Config::default();
        assert_eq!(config.backend, CameraBackendType::Webcam);
        assert_eq!(config.device_path, "/dev/video0");
        assert_eq!(config.jpeg_quality, 95);
    }
}
