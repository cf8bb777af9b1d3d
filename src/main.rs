// SPDX-License-Identifier: GPL-3.0-only

use touchcam::app::{AppModel, Flags};
use touchcam::{i18n, storage};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=touchcam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    info!(version = env!("GIT_VERSION"), "Starting touchcam");

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Media lands on a removable volume when one is mounted; failing to
    // create the folder aborts startup.
    let storage_root = storage::prepare_storage_root()?;

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(320.0)
            .min_height(240.0),
    );

    cosmic::app::run::<AppModel>(settings, Flags { storage_root })?;

    Ok(())
}
