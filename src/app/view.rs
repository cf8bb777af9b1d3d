// SPDX-License-Identifier: GPL-3.0-only

//! Views for the main window, the gallery window and the modal dialogs

use crate::app::state::{AppModel, DialogPage, GalleryWindow, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, ContentFit, Length, window};
use cosmic::widget::{self, icon};

/// Square icon button for the control row
fn control_button<'a>(icon_name: &'static str, message: Message) -> Element<'a, Message> {
    widget::button::custom(icon::from_name(icon_name).size(ui::ICON_SIZE))
        .padding(2)
        .class(cosmic::theme::Button::Icon)
        .on_press(message)
        .into()
}

fn black_container<'a>(
    content: impl Into<Element<'a, Message>>,
    height: Length,
) -> Element<'a, Message> {
    widget::container(content)
        .width(Length::Fill)
        .height(height)
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::BLACK)),
            ..Default::default()
        })
        .into()
}

impl AppModel {
    /// Build the main window: live preview above a row of controls
    ///
    /// Nothing but a black surface is built when the camera failed to open;
    /// the fatal dialog is shown on top of it.
    pub fn view(&self) -> Element<'_, Message> {
        let Some(controller) = self.controller.as_ref() else {
            return black_container(widget::Space::new(Length::Fill, Length::Fill), Length::Fill);
        };

        let preview: Element<'_, Message> = match &self.preview {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Fill)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::Space::new(Length::Fill, Length::Fill).into(),
        };

        let mut controls = widget::row::with_capacity(4)
            .spacing(cosmic::theme::spacing().space_l)
            .align_y(Alignment::Center)
            .push(control_button("camera-photo-symbolic", Message::TakePhoto));

        if controller.supports_video() {
            let record_icon = if controller.is_recording() {
                "media-playback-stop-symbolic"
            } else {
                "media-record-symbolic"
            };
            controls = controls.push(control_button(record_icon, Message::ToggleRecording));
        }

        controls = controls
            .push(control_button("folder-pictures-symbolic", Message::OpenGallery))
            .push(control_button("application-exit-symbolic", Message::Quit));

        let control_row = widget::container(controls)
            .width(Length::Fill)
            .height(Length::Fixed(ui::BUTTON_ROW_HEIGHT))
            .align_x(Alignment::Center)
            .align_y(Alignment::Center);

        black_container(
            widget::column::with_capacity(2)
                .push(black_container(preview, Length::Fill))
                .push(control_row),
            Length::Fill,
        )
    }

    /// Views for windows other than the main one
    pub fn view_window(&self, id: window::Id) -> Element<'_, Message> {
        match &self.gallery {
            Some(gallery) if gallery.id == id => self.view_gallery(gallery),
            _ => widget::Space::new(Length::Fill, Length::Fill).into(),
        }
    }

    fn view_gallery<'a>(&'a self, gallery: &'a GalleryWindow) -> Element<'a, Message> {
        let viewport: Element<'_, Message> = match &gallery.image {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Fill)
                .width(Length::Fixed(ui::GALLERY_VIEWPORT_WIDTH as f32))
                .height(Length::Fixed(ui::GALLERY_VIEWPORT_HEIGHT as f32))
                .into(),
            None => widget::container(widget::text::body(fl!(
                "gallery-load-failed",
                path = gallery.index.current().display().to_string()
            )))
            .center(Length::Fill)
            .into(),
        };

        let nav_button = |label: String, message: Message| {
            widget::button::custom(widget::text(label).size(ui::GALLERY_BUTTON_TEXT_SIZE))
                .padding([8, 16])
                .on_press(message)
        };

        let position = widget::text::body(fl!(
            "gallery-position",
            index = gallery.index.cursor() + 1,
            count = gallery.index.len()
        ));

        let controls = widget::row::with_capacity(4)
            .spacing(cosmic::theme::spacing().space_m)
            .align_y(Alignment::Center)
            .push(nav_button(fl!("gallery-previous"), Message::GalleryPrevious))
            .push(position)
            .push(nav_button(fl!("gallery-next"), Message::GalleryNext))
            .push(widget::horizontal_space())
            .push(widget::button::text(fl!("gallery-close")).on_press(Message::CloseGallery));

        widget::column::with_capacity(2)
            .push(black_container(
                viewport,
                Length::Fixed(ui::GALLERY_VIEWPORT_HEIGHT as f32),
            ))
            .push(
                widget::container(controls)
                    .padding([0, cosmic::theme::spacing().space_s])
                    .height(Length::Fixed(ui::GALLERY_CONTROLS_HEIGHT))
                    .align_y(Alignment::Center),
            )
            .into()
    }

    /// The modal on top of the main window, countdown first
    pub fn view_dialog(&self) -> Option<Element<'_, Message>> {
        if let Some(remaining) = self
            .controller
            .as_ref()
            .and_then(|c| c.countdown_remaining())
        {
            let digits = widget::text(remaining.to_string()).size(ui::COUNTDOWN_TEXT_SIZE);
            return Some(
                widget::dialog()
                    .title(fl!("countdown-title"))
                    .control(widget::container(digits).center_x(Length::Fill))
                    .into(),
            );
        }

        let page = self.dialog.as_ref()?;
        let ok = widget::button::suggested(fl!("ok")).on_press(Message::DismissDialog);

        let dialog = match page {
            DialogPage::Fatal(reason) => widget::dialog()
                .title(fl!("camera-open-failed"))
                .body(fl!("camera-open-failed-detail", reason = reason.as_str()))
                .icon(icon::from_name("dialog-error-symbolic").size(64)),
            DialogPage::PhotoSaved(path) => widget::dialog()
                .title(fl!("photo-saved"))
                .body(fl!("saved-path", path = path.display().to_string())),
            DialogPage::VideoSaved(path) => widget::dialog()
                .title(fl!("video-saved"))
                .body(fl!("saved-path", path = path.display().to_string())),
            DialogPage::NoPhotos => widget::dialog()
                .title(fl!("gallery"))
                .body(fl!("gallery-empty")),
            DialogPage::Error { title, body } => widget::dialog()
                .title(title.clone())
                .body(body.clone())
                .icon(icon::from_name("dialog-warning-symbolic").size(64)),
        };

        Some(dialog.primary_action(ok).into())
    }
}
