// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! # Architecture
//!
//! - `controller`: camera, snapshot, recording and countdown, independent of the GUI
//! - `countdown`: 3-2-1 state machine
//! - `gallery`: photo list with a wrapping cursor
//! - `state`: application state types (AppModel, Message, DialogPage)
//! - `view`: main window, gallery window and dialog rendering
//! - `update`: message dispatch into `handlers`

pub mod controller;
pub mod countdown;
pub mod gallery;
mod handlers;
mod state;
mod update;
mod view;

use crate::backends::camera::create_source;
use crate::config::Config;
use crate::pipelines::photo::{PhotoEncoder, PhotoPipeline};
use crate::pipelines::video::AviRecorderFactory;
use crate::storage::MediaLayout;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::{Event, Subscription, event, window};
use cosmic::{Element, Task};
pub use controller::{Controller, CountdownStep, RecordingEvent, RecordingState};
pub use countdown::{Countdown, CountdownState};
pub use gallery::GalleryIndex;
pub use state::{AppModel, DialogPage, Flags, GalleryWindow, Message, start_camera};
use tracing::{error, info};

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = Flags;

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.touchcam.Touchcam";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Opens the camera and starts the display loop.
    fn init(
        mut core: cosmic::Core,
        flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        core.window.show_headerbar = false;

        // Load configuration
        let config = match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
            Ok(handler) => match Config::get_entry(&handler) {
                Ok(config) => config,
                Err((errors, config)) => {
                    error!(?errors, "Errors loading config");
                    config
                }
            },
            Err(err) => {
                error!(%err, "Failed to create config handler");
                Config::default()
            }
        };
        info!(?config, storage_root = %flags.storage_root.display(), "Configuration loaded");

        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let controller = Controller::new(
            create_source(config.backend, &config.device_path),
            Box::new(AviRecorderFactory),
            MediaLayout::new(flags.storage_root),
            PhotoPipeline::new(PhotoEncoder::new(config.jpeg_quality)),
        );

        let (controller, dialog) = start_camera(controller);

        let mut tasks = Vec::new();
        if let Some(id) = core.main_window_id() {
            tasks.push(window::change_mode(id, window::Mode::Fullscreen));
        }
        if controller.is_some() {
            tasks.push(Task::done(cosmic::Action::App(Message::Tick)));
        }

        let app = AppModel {
            core,
            controller,
            dialog,
            preview: None,
            window_size: None,
            gallery: None,
        };

        (app, Task::batch(tasks))
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    fn view_window(&self, id: window::Id) -> Element<'_, Self::Message> {
        self.view_window(id)
    }

    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        self.view_dialog()
    }

    fn on_close_requested(&self, id: window::Id) -> Option<Self::Message> {
        Some(Message::WindowCloseRequested(id))
    }

    /// Window resize events feed the preview scaling.
    fn subscription(&self) -> Subscription<Self::Message> {
        event::listen_with(|event, _status, id| match event {
            Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(id, size)),
            _ => None,
        })
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
