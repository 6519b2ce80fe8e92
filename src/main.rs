//! Trackpin - map-based workout log
//!
//! Main entry point for the application.

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trackpin::storage::config::{
    get_config_path, get_data_dir, load_config, save_config, AppConfig,
};

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Trackpin v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().unwrap_or_else(|e| {
        tracing::warn!("Using default configuration: {}", e);
        AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        }
    });

    if !get_config_path().exists() {
        match save_config(&config) {
            Ok(()) => tracing::info!("Wrote default configuration to {:?}", get_config_path()),
            Err(e) => tracing::warn!("Could not write configuration: {}", e),
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Trackpin"),
        ..Default::default()
    };

    eframe::run_native(
        "Trackpin",
        options,
        Box::new(move |cc| Ok(Box::new(app::TrackpinApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
