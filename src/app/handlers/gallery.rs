// SPDX-License-Identifier: GPL-3.0-only

//! Gallery viewer window handlers

use crate::app::state::{AppModel, DialogPage, GalleryWindow, Message};
use crate::constants::ui;
use crate::errors::AppError;
use crate::fl;
use crate::media::load_viewport_image;
use cosmic::Task;
use cosmic::iced::{Size, window};
use cosmic::widget::image::Handle;
use std::path::Path;
use tracing::{info, warn};

/// Decode a photo for the viewer; `None` is rendered as a load error
fn load_photo(path: &Path) -> Option<Handle> {
    match load_viewport_image(path, ui::GALLERY_VIEWPORT_WIDTH, ui::GALLERY_VIEWPORT_HEIGHT) {
        Ok(image) => Some(Handle::from_rgba(image.width, image.height, image.rgba)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Failed to load photo");
            None
        }
    }
}

impl AppModel {
    pub(crate) fn handle_open_gallery(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(controller) = self.controller.as_ref() else {
            return Task::none();
        };

        let index = match controller.open_gallery() {
            Ok(index) => index,
            Err(AppError::NoMediaFound) => {
                info!("Gallery requested with no photos");
                self.dialog = Some(DialogPage::NoPhotos);
                return Task::none();
            }
            Err(err) => {
                self.dialog = Some(DialogPage::Error {
                    title: fl!("gallery"),
                    body: err.to_string(),
                });
                return Task::none();
            }
        };

        let mut tasks = Vec::new();
        if let Some(previous) = self.gallery.take() {
            tasks.push(window::close(previous.id));
        }

        let (id, open) = window::open(window::Settings {
            size: Size::new(
                ui::GALLERY_VIEWPORT_WIDTH as f32,
                ui::GALLERY_VIEWPORT_HEIGHT as f32 + ui::GALLERY_CONTROLS_HEIGHT,
            ),
            resizable: false,
            ..Default::default()
        });
        tasks.push(open.map(|_| cosmic::Action::App(Message::Noop)));

        info!(count = index.len(), "Opening gallery");
        let image = load_photo(index.current());
        self.gallery = Some(GalleryWindow { id, index, image });

        Task::batch(tasks)
    }

    pub(crate) fn handle_gallery_next(&mut self) -> Task<cosmic::Action<Message>> {
        if let Some(gallery) = self.gallery.as_mut() {
            let path = gallery.index.next();
            gallery.image = load_photo(path);
        }
        Task::none()
    }

    pub(crate) fn handle_gallery_previous(&mut self) -> Task<cosmic::Action<Message>> {
        if let Some(gallery) = self.gallery.as_mut() {
            let path = gallery.index.previous();
            gallery.image = load_photo(path);
        }
        Task::none()
    }

    pub(crate) fn handle_close_gallery(&mut self) -> Task<cosmic::Action<Message>> {
        match self.gallery.take() {
            Some(gallery) => window::close(gallery.id),
            None => Task::none(),
        }
    }
}
