// SPDX-License-Identifier: GPL-3.0-only

//! Application controller
//!
//! Owns everything the buttons and the display loop act on: the camera, the
//! last displayed frame, the open video file and the photo countdown. The
//! GUI layer only translates messages into calls on this type and results
//! into dialogs, so the whole capture flow can be exercised without a window.

use super::countdown::{Countdown, CountdownState};
use super::gallery::GalleryIndex;
use crate::backends::camera::{CameraSource, Frame};
use crate::constants::{pipeline, timing};
use crate::errors::{AppError, AppResult, CameraError, RecordingError};
use crate::pipelines::photo::PhotoPipeline;
use crate::pipelines::video::{VideoSink, VideoSinkFactory, VideoSpec};
use crate::storage::MediaLayout;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Video recording state
///
/// The sink exists exactly while recording.
pub enum RecordingState {
    Idle,
    Recording {
        sink: Box<dyn VideoSink>,
        file_path: PathBuf,
        started_at: DateTime<Local>,
    },
}

impl RecordingState {
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording { .. })
    }
}

impl std::fmt::Debug for RecordingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingState::Idle => write!(f, "Idle"),
            RecordingState::Recording {
                sink,
                file_path,
                started_at,
            } => f
                .debug_struct("Recording")
                .field("file_path", file_path)
                .field("started_at", started_at)
                .field("frames", &sink.frames_written())
                .finish(),
        }
    }
}

/// Outcome of one countdown step
#[derive(Debug)]
pub enum CountdownStep {
    /// Still counting; the overlay shows this number
    Showing(u32),
    /// The countdown reached zero, the overlay is gone and a photo was attempted
    Captured(AppResult<PathBuf>),
    /// No countdown was running
    Idle,
}

/// Outcome of a successful record/stop toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingEvent {
    Started(PathBuf),
    Stopped(PathBuf),
}

pub struct Controller {
    camera: Box<dyn CameraSource>,
    sinks: Box<dyn VideoSinkFactory>,
    layout: MediaLayout,
    photos: PhotoPipeline,
    current_frame: Option<Frame>,
    recording: RecordingState,
    countdown: Option<Countdown>,
    shutting_down: bool,
}

impl Controller {
    pub fn new(
        camera: Box<dyn CameraSource>,
        sinks: Box<dyn VideoSinkFactory>,
        layout: MediaLayout,
        photos: PhotoPipeline,
    ) -> Self {
        Self {
            camera,
            sinks,
            layout,
            photos,
            current_frame: None,
            recording: RecordingState::Idle,
            countdown: None,
            shutting_down: false,
        }
    }

    /// Open the camera
    pub fn start(&mut self) -> Result<(), CameraError> {
        info!(backend = %self.camera.backend_type(), "Starting camera");
        self.camera.open()
    }

    /// One display-loop step
    ///
    /// Reads a frame, keeps it as the photo snapshot and, while recording,
    /// appends it unscaled to the video file. `None` means nothing new arrived
    /// and the tick is skipped.
    pub fn poll_frame(&mut self) -> Option<&Frame> {
        if self.shutting_down {
            return None;
        }
        let frame = self.camera.read_frame()?;

        if let RecordingState::Recording { sink, .. } = &mut self.recording
            && let Err(e) = sink.write_frame(&frame)
        {
            warn!(error = %e, "Dropped frame while recording");
        }

        self.current_frame = Some(frame);
        self.current_frame.as_ref()
    }

    /// Start the 3-2-1 countdown
    ///
    /// Returns `false` if one is already running; it cannot be restarted or aborted.
    pub fn begin_countdown(&mut self) -> bool {
        if self.shutting_down || self.countdown.is_some() {
            debug!("Photo requested while countdown running, ignored");
            return false;
        }
        info!("Photo countdown started");
        self.countdown = Some(Countdown::start());
        true
    }

    /// Advance the countdown by one second
    ///
    /// On reaching zero the countdown is cleared first, then the photo is taken.
    pub fn countdown_tick(&mut self, now: DateTime<Local>) -> CountdownStep {
        let Some(countdown) = self.countdown.as_mut() else {
            return CountdownStep::Idle;
        };

        match countdown.tick() {
            CountdownState::Done => {
                self.countdown = None;
                CountdownStep::Captured(self.capture_photo(now))
            }
            state => {
                debug!(remaining = state.remaining(), "Countdown tick");
                CountdownStep::Showing(state.remaining())
            }
        }
    }

    /// Write a photo into today's folder
    pub fn capture_photo(&mut self, now: DateTime<Local>) -> AppResult<PathBuf> {
        let path = self.layout.photo_path(&now)?;
        self.photos
            .capture_to(self.camera.as_mut(), self.current_frame.as_ref(), &path)
            .inspect_err(|e| error!(error = %e, "Photo capture failed"))?;
        Ok(path)
    }

    /// Start recording when idle, stop and finalize when recording
    pub fn toggle_recording(&mut self, now: DateTime<Local>) -> AppResult<RecordingEvent> {
        match std::mem::replace(&mut self.recording, RecordingState::Idle) {
            RecordingState::Recording {
                sink, started_at, ..
            } => {
                let elapsed = now.signed_duration_since(started_at);
                info!(
                    seconds = elapsed.num_seconds(),
                    frames = sink.frames_written(),
                    "Stopping recording"
                );
                let path = sink.finish()?;
                Ok(RecordingEvent::Stopped(path))
            }
            RecordingState::Idle => self.start_recording(now),
        }
    }

    fn start_recording(&mut self, now: DateTime<Local>) -> AppResult<RecordingEvent> {
        if !self.camera.supports_video() {
            return Err(RecordingError::NotSupported.into());
        }
        if !self.camera.is_open() {
            return Err(CameraError::NotOpen.into());
        }

        let frame = self
            .camera
            .read_frame_timeout(Duration::from_millis(pipeline::VALIDATION_TIMEOUT_MS))
            .ok_or(CameraError::ReadFailure)?;

        let spec = VideoSpec::for_frame(&frame, timing::VIDEO_FPS);
        let path = self.layout.video_path(&now)?;
        let mut sink = self.sinks.create(&path, spec)?;

        // The encoder only proves itself once data flows through it
        if let Err(e) = sink.write_frame(&frame) {
            drop(sink);
            if let Err(remove) = std::fs::remove_file(&path)
                && remove.kind() != std::io::ErrorKind::NotFound
            {
                warn!(path = %path.display(), error = %remove, "Failed to remove aborted video");
            }
            return Err(RecordingError::StartFailed(e.to_string()).into());
        }

        info!(path = %path.display(), width = spec.width, height = spec.height, "Recording started");
        self.current_frame = Some(frame);
        self.recording = RecordingState::Recording {
            sink,
            file_path: path.clone(),
            started_at: now,
        };
        Ok(RecordingEvent::Started(path))
    }

    /// Every saved photo under the storage root
    pub fn open_gallery(&self) -> AppResult<GalleryIndex> {
        GalleryIndex::scan(self.layout.root()).ok_or(AppError::NoMediaFound)
    }

    /// Release the camera and finalize any open recording
    ///
    /// After this the display loop stops reading and further calls are no-ops.
    pub fn shutdown(&mut self) {
        if self.shutting_down {
            return;
        }
        self.shutting_down = true;
        self.countdown = None;

        if let RecordingState::Recording {
            sink, file_path, ..
        } = std::mem::replace(&mut self.recording, RecordingState::Idle)
        {
            match sink.finish() {
                Ok(path) => info!(path = %path.display(), "Recording finalized on quit"),
                Err(e) => error!(path = %file_path.display(), error = %e, "Recording lost on quit"),
            }
        }

        self.camera.close();
        info!("Controller shut down");
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_recording()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.current_frame.as_ref()
    }

    /// Number shown by the countdown overlay, if one is running
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown.map(|c| c.remaining())
    }

    pub fn supports_video(&self) -> bool {
        self.camera.supports_video()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }
}
