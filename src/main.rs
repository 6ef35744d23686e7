//! Crime Explorer - Boston Crime Incident Explorer & Interactive Chart Viewer
//!
//! Loads the incident and police district tables once, then lets the user
//! switch between maps, bar, histogram, pivot and pie views of the data.

mod charts;
mod config;
mod data;
mod gui;
mod stats;
mod view;

use clap::Parser;
use data::DataLoader;
use eframe::egui;
use gui::CrimeExplorerApp;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let args = config::Args::parse();

    log::info!(
        "Loading incidents from {} and districts from {}",
        args.incidents.display(),
        args.districts.display()
    );
    let dataset = DataLoader::load_dataset(&args.incidents, &args.districts)
        .inspect_err(|e| log::error!("Failed to load dataset: {e}"))?;
    log::info!(
        "Loaded {} incidents, {} districts",
        dataset.incidents().len(),
        dataset.districts().len()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Crime Explorer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Crime Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(CrimeExplorerApp::new(cc, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
