// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The `update()` function is a dispatcher; the work happens in the
//! `handlers` submodules:
//!
//! - `handlers::capture`: display loop, photo countdown, recording
//! - `handlers::gallery`: gallery viewer window
//! - `handlers::system`: window events, dialogs, quit

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== Display loop =====
            Message::Tick => self.handle_tick(),

            // ===== Capture =====
            Message::TakePhoto => self.handle_take_photo(),
            Message::CountdownTick => self.handle_countdown_tick(),
            Message::ToggleRecording => self.handle_toggle_recording(),

            // ===== Gallery =====
            Message::OpenGallery => self.handle_open_gallery(),
            Message::GalleryNext => self.handle_gallery_next(),
            Message::GalleryPrevious => self.handle_gallery_previous(),
            Message::CloseGallery => self.handle_close_gallery(),

            // ===== Windows and dialogs =====
            Message::WindowResized(id, size) => self.handle_window_resized(id, size),
            Message::WindowCloseRequested(id) => self.handle_window_close_requested(id),
            Message::DismissDialog => self.handle_dismiss_dialog(),
            Message::Quit => self.handle_quit(),
            Message::Noop => Task::none(),
        }
    }
}
