// SPDX-License-Identifier: GPL-3.0-only

//! AVI recorder fed from the application through `appsrc`

use super::encoder_selection::select_video_encoder;
use super::{VideoSink, VideoSinkFactory, VideoSpec};
use crate::backends::camera::Frame;
use crate::constants::pipeline as tuning;
use crate::errors::RecordingError;
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app::AppSrc;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Video file being written by a GStreamer pipeline
///
/// Frames are stamped at a fixed `1/fps` interval, so playback speed depends
/// only on the number of frames written, not on when they arrived.
///
/// The sinks cannot preroll before data arrives, so encoder and muxer
/// failures are reported by the first [`write_frame`](VideoSink::write_frame).
pub struct AviRecorder {
    pipeline: gst::Pipeline,
    appsrc: AppSrc,
    spec: VideoSpec,
    file_path: PathBuf,
    frames: u64,
    prerolled: bool,
}

impl AviRecorder {
    /// Build the pipeline and start it
    pub fn start(path: &Path, spec: VideoSpec) -> Result<Self, RecordingError> {
        info!(
            path = %path.display(),
            width = spec.width,
            height = spec.height,
            fps = spec.fps,
            "Starting video recording"
        );

        gst::init().map_err(|e| RecordingError::StartFailed(e.to_string()))?;
        let encoder = select_video_encoder()?.build()?;

        let pipeline = gst::Pipeline::new();
        let appsrc = gst::ElementFactory::make("appsrc")
            .name("frames")
            .build()
            .map_err(|e| RecordingError::StartFailed(format!("appsrc: {}", e)))?
            .downcast::<AppSrc>()
            .map_err(|_| RecordingError::StartFailed("appsrc has the wrong type".into()))?;
        let convert = make("videoconvert")?;
        let muxer = make("avimux")?;
        let filesink = make("filesink")?;
        filesink.set_property("location", path.to_string_lossy().to_string());

        let caps = gst::Caps::builder("video/x-raw")
            .field("format", spec.format.gst_format())
            .field("width", spec.width as i32)
            .field("height", spec.height as i32)
            .field("framerate", gst::Fraction::new(spec.fps as i32, 1))
            .build();
        appsrc.set_caps(Some(&caps));
        appsrc.set_format(gst::Format::Time);

        pipeline
            .add_many([appsrc.upcast_ref(), &convert, &encoder, &muxer, &filesink])
            .map_err(|e| RecordingError::StartFailed(format!("failed to add elements: {}", e)))?;
        gst::Element::link_many([appsrc.upcast_ref(), &convert, &encoder, &muxer, &filesink])
            .map_err(|e| RecordingError::StartFailed(format!("failed to link elements: {}", e)))?;

        if let Err(e) = pipeline.set_state(gst::State::Playing) {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(RecordingError::StartFailed(format!("{:?}", e)));
        }

        let recorder = Self {
            pipeline,
            appsrc,
            spec,
            file_path: path.to_path_buf(),
            frames: 0,
            prerolled: false,
        };

        // Only errors already posted are checked; nothing is waited for here
        if let Some(bus) = recorder.pipeline.bus()
            && let Some(msg) = bus.pop_filtered(&[gst::MessageType::Error])
            && let gst::MessageView::Error(err) = msg.view()
        {
            error!(
                error = %err.error(),
                debug = ?err.debug(),
                source = ?err.src().map(|s| s.name()),
                "GStreamer error during recording start"
            );
            return Err(RecordingError::StartFailed(err.error().to_string()));
        }

        Ok(recorder)
    }

    /// Wait until the first frame has gone through to the file, or an error
    ///
    /// Returns as soon as either message arrives.
    fn await_preroll(&mut self) -> Result<(), RecordingError> {
        self.prerolled = true;
        let Some(bus) = self.pipeline.bus() else {
            return Ok(());
        };

        match bus.timed_pop_filtered(
            gst::ClockTime::from_seconds(tuning::START_TIMEOUT_SECS),
            &[gst::MessageType::AsyncDone, gst::MessageType::Error],
        ) {
            Some(msg) => match msg.view() {
                gst::MessageView::Error(err) => {
                    error!(
                        error = %err.error(),
                        debug = ?err.debug(),
                        source = ?err.src().map(|s| s.name()),
                        "GStreamer error on first recorded frame"
                    );
                    Err(RecordingError::WriteFailed(err.error().to_string()))
                }
                _ => {
                    debug!("Recording pipeline prerolled");
                    Ok(())
                }
            },
            None => {
                warn!("Recording pipeline did not preroll in time");
                Ok(())
            }
        }
    }

    fn frame_time(&self, index: u64) -> gst::ClockTime {
        gst::ClockTime::from_nseconds(index * gst::ClockTime::SECOND.nseconds() / self.spec.fps as u64)
    }
}

fn make(factory: &str) -> Result<gst::Element, RecordingError> {
    gst::ElementFactory::make(factory)
        .build()
        .map_err(|e| RecordingError::StartFailed(format!("{}: {}", factory, e)))
}

impl VideoSink for AviRecorder {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), RecordingError> {
        if !self.spec.accepts(frame) {
            return Err(RecordingError::WriteFailed(format!(
                "frame {}x{} {:?} does not match recording {}x{} {:?}",
                frame.width,
                frame.height,
                frame.format,
                self.spec.width,
                self.spec.height,
                self.spec.format
            )));
        }

        let mut buffer = gst::Buffer::from_slice(frame.data.clone());
        {
            let buffer = buffer
                .get_mut()
                .ok_or_else(|| RecordingError::WriteFailed("buffer is shared".into()))?;
            buffer.set_pts(self.frame_time(self.frames));
            buffer.set_duration(self.frame_time(self.frames + 1) - self.frame_time(self.frames));
        }

        self.appsrc
            .push_buffer(buffer)
            .map_err(|e| RecordingError::WriteFailed(format!("{:?}", e)))?;

        self.frames += 1;
        if !self.prerolled {
            self.await_preroll()?;
        }
        if self.frames % crate::constants::timing::FRAME_LOG_INTERVAL == 0 {
            debug!(frames = self.frames, "Recording");
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<PathBuf, RecordingError> {
        info!(frames = self.frames, "Stopping video recording");

        if let Err(e) = self.appsrc.end_of_stream() {
            warn!(?e, "Failed to send EOS");
        }

        // Wait for the muxer to write its index before tearing down
        let mut result = Ok(());
        if let Some(bus) = self.pipeline.bus() {
            match bus.timed_pop_filtered(
                gst::ClockTime::from_seconds(tuning::STOP_TIMEOUT_SECS),
                &[gst::MessageType::Eos, gst::MessageType::Error],
            ) {
                Some(msg) => {
                    if let gst::MessageView::Error(err) = msg.view() {
                        result = Err(RecordingError::FinalizeFailed(err.error().to_string()));
                    }
                }
                None => warn!("Timed out waiting for EOS, file may be truncated"),
            }
        }

        self.pipeline
            .set_state(gst::State::Null)
            .map_err(|e| RecordingError::FinalizeFailed(format!("{:?}", e)))?;
        result?;

        info!(path = %self.file_path.display(), "Recording saved");
        Ok(self.file_path.clone())
    }

    fn frames_written(&self) -> u64 {
        self.frames
    }
}

impl Drop for AviRecorder {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

/// Opens [`AviRecorder`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct AviRecorderFactory;

impl VideoSinkFactory for AviRecorderFactory {
    fn create(&self, path: &Path, spec: VideoSpec) -> Result<Box<dyn VideoSink>, RecordingError> {
        Ok(Box::new(AviRecorder::start(path, spec)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::PixelFormat;
    use std::time::{Duration, Instant};

    /// Width and height from the `avih` main header of a RIFF AVI file
    fn avi_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
        if bytes.get(0..4)? != b"RIFF" || bytes.get(8..12)? != b"AVI " {
            return None;
        }
        let chunk = bytes.windows(4).position(|w| w == b"avih")?;
        let field = |offset: usize| {
            let start = chunk + 8 + offset;
            bytes
                .get(start..start + 4)
                .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        };
        Some((field(32)?, field(36)?))
    }

    fn gstreamer_ready() -> bool {
        gst::init().is_ok()
            && select_video_encoder().is_ok()
            && ["appsrc", "videoconvert", "avimux", "filesink"]
                .iter()
                .all(|name| gst::ElementFactory::find(name).is_some())
    }

    #[test]
    fn test_records_playable_file() {
        if !gstreamer_ready() {
            eprintln!("GStreamer elements missing, skipping");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video_test.avi");
        let frame = Frame::new(64, 48, vec![90u8; 64 * 48 * 3], PixelFormat::Bgr);
        let spec = VideoSpec::for_frame(&frame, 20);

        let mut sink = AviRecorderFactory.create(&path, spec).unwrap();
        for _ in 0..10 {
            sink.write_frame(&frame).unwrap();
        }
        assert_eq!(sink.frames_written(), 10);

        let saved = sink.finish().unwrap();
        assert_eq!(saved, path);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(avi_dimensions(&bytes), Some((64, 48)));
    }

    #[test]
    fn test_start_returns_before_first_frame() {
        if !gstreamer_ready() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(64, 48, vec![0u8; 64 * 48 * 3], PixelFormat::Bgr);

        let started = Instant::now();
        let sink = AviRecorderFactory
            .create(&dir.path().join("v.avi"), VideoSpec::for_frame(&frame, 20))
            .unwrap();
        assert!(started.elapsed() < Duration::from_millis(tuning::START_ERROR_WINDOW_MS));
        drop(sink);
    }

    #[test]
    fn test_unwritable_path_fails_to_start() {
        if !gstreamer_ready() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("v.avi");
        let frame = Frame::new(64, 48, vec![0u8; 64 * 48 * 3], PixelFormat::Bgr);

        assert!(matches!(
            AviRecorderFactory.create(&path, VideoSpec::for_frame(&frame, 20)),
            Err(RecordingError::StartFailed(_))
        ));
    }

    #[test]
    fn test_avi_dimensions_reads_main_header() {
        let mut bytes = b"RIFF\0\0\0\0AVI LIST\0\0\0\0hdrlavih\x38\0\0\0".to_vec();
        let mut header = [0u8; 56];
        header[32..36].copy_from_slice(&640u32.to_le_bytes());
        header[36..40].copy_from_slice(&480u32.to_le_bytes());
        bytes.extend_from_slice(&header);

        assert_eq!(avi_dimensions(&bytes), Some((640, 480)));
        assert_eq!(avi_dimensions(b"RIFF\0\0\0\0WAVE"), None);
    }

    #[test]
    fn test_rejects_mismatched_frame() {
        if !gstreamer_ready() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(64, 48, vec![0u8; 64 * 48 * 3], PixelFormat::Bgr);
        let mut sink = AviRecorderFactory
            .create(&dir.path().join("v.avi"), VideoSpec::for_frame(&frame, 20))
            .unwrap();

        let other = Frame::new(32, 24, vec![0u8; 32 * 24 * 3], PixelFormat::Bgr);
        assert!(matches!(
            sink.write_frame(&other),
            Err(RecordingError::WriteFailed(_))
        ));
    }
}
