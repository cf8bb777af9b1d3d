// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera application
//!
//! Every failure ends up in front of the user as a dialog. The variants map
//! onto three user-facing classes:
//!
//! - fatal: [`CameraError::DeviceUnavailable`] at startup
//! - skipped action: [`CameraError::ReadFailure`], [`PhotoError`], [`RecordingError`]
//! - informational: [`AppError::NoMediaFound`]

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Recording-related errors
    Recording(RecordingError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Storage/filesystem errors
    Storage(String),
    /// Gallery has nothing to show
    NoMediaFound,
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Camera could not be opened
    DeviceUnavailable(String),
    /// A single frame read returned nothing
    ReadFailure,
    /// Camera operation attempted on a closed device
    NotOpen,
}

/// Recording-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingError {
    /// Failed to start recording
    StartFailed(String),
    /// A frame could not be appended
    WriteFailed(String),
    /// The file could not be finalized
    FinalizeFailed(String),
    /// No encoder element is installed
    EncoderNotAvailable,
    /// The active camera source has no video feature
    NotSupported,
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// No frame available for capture
    NoFrameAvailable,
    /// Encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Recording(e) => write!(f, "Recording error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::NoMediaFound => write!(f, "No photos found"),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::DeviceUnavailable(msg) => write!(f, "Cannot open camera: {}", msg),
            CameraError::ReadFailure => write!(f, "Camera returned no frame"),
            CameraError::NotOpen => write!(f, "Camera is not open"),
        }
    }
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingError::StartFailed(msg) => write!(f, "Failed to start recording: {}", msg),
            RecordingError::WriteFailed(msg) => write!(f, "Failed to write frame: {}", msg),
            RecordingError::FinalizeFailed(msg) => write!(f, "Failed to save recording: {}", msg),
            RecordingError::EncoderNotAvailable => write!(f, "No video encoder available"),
            RecordingError::NotSupported => write!(f, "This camera cannot record video"),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for RecordingError {}
impl std::error::Error for PhotoError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<RecordingError> for AppError {
    fn from(err: RecordingError) -> Self {
        AppError::Recording(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_becomes_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Storage(ref msg) if msg.contains("read-only")));
    }

    #[test]
    fn test_display_names_the_device() {
        let err = AppError::from(CameraError::DeviceUnavailable("/dev/video0".into()));
        assert_eq!(err.to_string(), "Camera error: Cannot open camera: /dev/video0");
    }
}
