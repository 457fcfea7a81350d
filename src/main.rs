//! Othello GUI
//!
//! Play against the engine or run a hotseat game. Engine settings are read
//! from `othello.toml` when present.

use std::path::Path;

use anyhow::Context;
use othello::config::AppConfig;
use othello::init_logging;
use othello::ui::OthelloApp;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::load_or_default(Path::new("othello.toml"))
        .context("failed to load othello.toml")?;
    config.validate()?;
    let engine = config.engine;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Othello"),
        ..Default::default()
    };

    eframe::run_native(
        "Othello",
        options,
        Box::new(move |cc| Ok(Box::new(OthelloApp::with_engine_config(cc, engine)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
