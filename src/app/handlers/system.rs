// SPDX-License-Identifier: GPL-3.0-only

//! Window, dialog and shutdown handlers

use crate::app::state::{AppModel, Message};
use cosmic::Task;
use cosmic::iced::{Size, window};
use tracing::{debug, info};

impl AppModel {
    pub(crate) fn handle_window_resized(
        &mut self,
        id: window::Id,
        size: Size,
    ) -> Task<cosmic::Action<Message>> {
        if self.core.main_window_id() == Some(id) {
            debug!(width = size.width, height = size.height, "Main window resized");
            self.window_size = Some(size);
        }
        Task::none()
    }

    /// Closing the viewer only drops the gallery; closing anything else quits
    pub(crate) fn handle_window_close_requested(
        &mut self,
        id: window::Id,
    ) -> Task<cosmic::Action<Message>> {
        if self.gallery.as_ref().is_some_and(|g| g.id == id) {
            return self.handle_close_gallery();
        }
        self.handle_quit()
    }

    pub(crate) fn handle_dismiss_dialog(&mut self) -> Task<cosmic::Action<Message>> {
        match self.dialog.take() {
            Some(page) if page.is_fatal() => self.handle_quit(),
            _ => Task::none(),
        }
    }

    /// The only teardown path: finalize any recording, release the camera, exit
    pub(crate) fn handle_quit(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Quit requested");
        if let Some(controller) = self.controller.as_mut() {
            controller.shutdown();
        }
        self.gallery = None;
        cosmic::iced::exit()
    }
}
