//! Binary entry point for the subtitle translator window.

mod app;
mod dialogs;
mod view;
mod worker;

use anyhow::{anyhow, Result};
use app::TranslatorApp;
use clap::Parser;
use eframe::egui;
use srt_translator_core::config::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line options for the binary.
#[derive(Parser)]
struct Cli {
    /// Enable verbose debug and trace logs.
    #[arg(long)]
    debug: bool,
}

/// Application entry point which sets up logging and opens the window.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::new("srt_translator=trace,srt_translator_core=trace,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("srt_translator=info,srt_translator_core=info,warn")
        })
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::default();
    info!(
        "starting, translating {} -> {}",
        settings.source_lang, settings.target_lang
    );
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SRT Translator")
            .with_inner_size([900.0, 700.0])
            .with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        "SRT Translator",
        options,
        Box::new(|_cc| Box::new(TranslatorApp::new(settings))),
    )
    .map_err(|err| anyhow!(err.to_string()))
}
