//! Application entry point for the ant path viewer.
//!
//! This binary parses the command line, sets up logging, loads the
//! configuration and delegates all interactive logic and rendering to
//! [`Viewer`] from the `viewer` module.

mod layer;
mod viewer;

use ant_core::config::Config;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use viewer::Viewer;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "ant-paths.json";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file. Also where "Save cfg" writes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for path generation and ant routing. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    init_tracing();
    let args = Args::parse();

    let explicit = args.config.is_some();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let cfg = load_config(&config_path, explicit);
    let seed = args.seed.unwrap_or_else(rand::random);

    info!(seed, config = %config_path.display(), "starting ant paths");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Ant Paths")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ant Paths",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg, config_path, seed)))),
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Loads `path`, falling back to defaults when it is missing or invalid.
///
/// A missing default file is expected and stays silent; anything else is
/// logged.
fn load_config(path: &Path, explicit: bool) -> Config {
    if !explicit && !path.exists() {
        return Config::default();
    }
    match Config::load(path) {
        Ok(cfg) => {
            info!(path = %path.display(), "loaded config");
            cfg
        }
        Err(e) => {
            warn!(error = %e, "falling back to default config");
            Config::default()
        }
    }
}
