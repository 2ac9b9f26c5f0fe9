//! Happiness Board - Country Happiness Indicators Dashboard
//!
//! Interactive line charts of happiness-related statistics per country and
//! year range, plus a dual-scale view of what moves India's happiness.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use config::BoardConfig;
use data::{indicator_file, DataSource, IndicatorFileSource, WorldBankDirectory};
use eframe::egui;
use gui::{HappinessBoardApp, UiOrchestrator};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = config::resolve_config_path();
    let config = BoardConfig::load(&config_path)?;
    info!(config = %config_path.display(), data = %config.indicator_data, "starting happiness board");

    let timeout = config.request_timeout();
    let files = match indicator_file::fetcher_for(&config.indicator_data, timeout) {
        Ok(fetcher) => Some(IndicatorFileSource::new(fetcher)),
        Err(err) => {
            error!("indicator files unavailable: {err}");
            None
        }
    };
    let source = Arc::new(DataSource::new(files));
    let directory = WorldBankDirectory::new(&config.country_directory_url, timeout)
        .context("failed to build HTTP client")?;

    let mut board = UiOrchestrator::new(&config, source);
    board.start(Box::new(directory));

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Happiness Board"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Happiness Board",
        options,
        Box::new(move |cc| Ok(Box::new(HappinessBoardApp::new(cc, board)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the window: {e}"))
}
