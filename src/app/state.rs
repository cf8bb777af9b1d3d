// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::controller::Controller;
use crate::app::gallery::GalleryIndex;
use cosmic::iced::{Size, window};
use cosmic::widget::image::Handle;
use std::path::PathBuf;
use tracing::error;

/// Startup data handed to the application by `main`
#[derive(Debug, Clone)]
pub struct Flags {
    /// Resolved and created storage root
    pub storage_root: PathBuf,
}

/// The modal shown over the main window
///
/// The photo countdown overlay is not listed here: it is derived from the
/// controller and always takes priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPage {
    /// Camera could not be opened; confirming quits
    Fatal(String),
    PhotoSaved(PathBuf),
    VideoSaved(PathBuf),
    /// Gallery has nothing to show
    NoPhotos,
    Error { title: String, body: String },
}

impl DialogPage {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DialogPage::Fatal(_))
    }
}

/// The gallery viewer window
pub struct GalleryWindow {
    pub id: window::Id,
    pub index: GalleryIndex,
    /// Current photo fitted to the viewport, `None` if it failed to load
    pub image: Option<Handle>,
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// `None` when the camera failed to open; the fatal dialog is showing
    pub controller: Option<Controller>,
    pub dialog: Option<DialogPage>,
    /// Last rendered preview frame
    pub preview: Option<Handle>,
    /// Main window size, once known
    pub window_size: Option<Size>,
    pub gallery: Option<GalleryWindow>,
}

impl AppModel {
    /// Area the preview is scaled to: the window minus the button row
    pub fn preview_target(&self) -> Option<(u32, u32)> {
        let size = self.window_size?;
        let height = size.height - crate::constants::ui::BUTTON_ROW_HEIGHT;
        if size.width < 1.0 || height < 1.0 {
            return None;
        }
        Some((size.width as u32, height as u32))
    }
}

/// Open the camera for a new application model
///
/// On failure the controller is dropped and only the fatal dialog remains,
/// so no controls are ever built.
pub fn start_camera(mut controller: Controller) -> (Option<Controller>, Option<DialogPage>) {
    match controller.start() {
        Ok(()) => (Some(controller), None),
        Err(err) => {
            error!(error = %err, "Camera unavailable");
            (None, Some(DialogPage::Fatal(err.to_string())))
        }
    }
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Display loop =====
    /// Poll the camera and refresh the preview
    Tick,

    // ===== Capture =====
    /// Photo button pressed: start the countdown
    TakePhoto,
    /// One countdown second elapsed
    CountdownTick,
    /// Record/stop button pressed
    ToggleRecording,

    // ===== Gallery =====
    OpenGallery,
    GalleryNext,
    GalleryPrevious,
    CloseGallery,

    // ===== Windows and dialogs =====
    WindowResized(window::Id, Size),
    WindowCloseRequested(window::Id),
    DismissDialog,
    Quit,
    Noop,
}
