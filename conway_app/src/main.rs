// main.rs - Desktop front end for the Game of Life engine

use anyhow::{anyhow, Context, Result};
use conway::{GridEngine, TickerOptions};
use eframe::egui;
use env_logger::{Builder, Env};
use log::info;

mod app;
mod cli;
mod ui;

use app::LifeApp;

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = cli::command().get_matches();
    let config = cli::resolve(&matches)?;
    info!(
        "{}x{} board, {} ms per generation",
        config.width, config.height, config.tick_interval_ms
    );

    let engine = GridEngine::from_config(&config).context("creating the engine")?;
    let runtime = tokio::runtime::Runtime::new().context("starting the tokio runtime")?;
    let options = TickerOptions::from(&config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        native_options,
        Box::new(move |cc| Box::new(LifeApp::new(cc.egui_ctx.clone(), engine, runtime, options))),
    )
    .map_err(|err| anyhow!("window closed with an error: {err}"))
}
