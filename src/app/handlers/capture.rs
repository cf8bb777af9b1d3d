// SPDX-License-Identifier: GPL-3.0-only

//! Display loop, photo countdown and recording handlers

use crate::app::controller::{CountdownStep, RecordingEvent};
use crate::app::state::{AppModel, DialogPage, Message};
use crate::constants::timing;
use crate::fl;
use crate::media::scale_for_display;
use cosmic::Task;
use cosmic::widget::image::Handle;
use tracing::info;

impl AppModel {
    // =========================================================================
    // Helper Functions
    // =========================================================================

    /// Create a delayed task that sends a message after the specified milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            cosmic::Action::App,
        )
    }

    // =========================================================================
    // Display Loop
    // =========================================================================

    /// Pull one frame, render it, and schedule the next tick
    ///
    /// The loop re-queues itself whether or not a frame arrived, and stops
    /// only once the controller is shutting down.
    pub(crate) fn handle_tick(&mut self) -> Task<cosmic::Action<Message>> {
        let target = self.preview_target();
        let Some(controller) = self.controller.as_mut() else {
            return Task::none();
        };
        if controller.is_shutting_down() {
            return Task::none();
        }

        if let Some(frame) = controller.poll_frame()
            && let Some(image) = scale_for_display(frame, target)
        {
            self.preview = Some(Handle::from_rgba(image.width, image.height, image.rgba));
        }

        Self::delay_task(timing::POLL_INTERVAL_MS, Message::Tick)
    }

    // =========================================================================
    // Photo Countdown
    // =========================================================================

    pub(crate) fn handle_take_photo(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(controller) = self.controller.as_mut() else {
            return Task::none();
        };
        if controller.begin_countdown() {
            return Self::delay_task(timing::COUNTDOWN_STEP_MS, Message::CountdownTick);
        }
        Task::none()
    }

    pub(crate) fn handle_countdown_tick(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(controller) = self.controller.as_mut() else {
            return Task::none();
        };

        match controller.countdown_tick(chrono::Local::now()) {
            CountdownStep::Showing(_) => {
                Self::delay_task(timing::COUNTDOWN_STEP_MS, Message::CountdownTick)
            }
            CountdownStep::Captured(Ok(path)) => {
                self.dialog = Some(DialogPage::PhotoSaved(path));
                Task::none()
            }
            CountdownStep::Captured(Err(err)) => {
                self.dialog = Some(DialogPage::Error {
                    title: fl!("photo-failed"),
                    body: err.to_string(),
                });
                Task::none()
            }
            CountdownStep::Idle => Task::none(),
        }
    }

    // =========================================================================
    // Video Recording
    // =========================================================================

    pub(crate) fn handle_toggle_recording(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(controller) = self.controller.as_mut() else {
            return Task::none();
        };
        let was_recording = controller.is_recording();

        match controller.toggle_recording(chrono::Local::now()) {
            Ok(RecordingEvent::Started(path)) => {
                info!(path = %path.display(), "Recording button now shows stop");
            }
            Ok(RecordingEvent::Stopped(path)) => {
                self.dialog = Some(DialogPage::VideoSaved(path));
            }
            Err(err) => {
                let title = if was_recording {
                    fl!("recording-stop-failed")
                } else {
                    fl!("recording-start-failed")
                };
                self.dialog = Some(DialogPage::Error {
                    title,
                    body: err.to_string(),
                });
            }
        }
        Task::none()
    }
}
