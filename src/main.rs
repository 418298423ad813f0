// main.rs
mod app;
mod config;
mod error;
mod utils;

use app::App;
use clap::Parser;
use config::Args;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = args.app_config();
    tracing::debug!(?config, "starting");

    let native_options = NativeOptions {
        initial_window_size: Some(egui::Vec2::new(700.0, 400.0)),
        resizable: true,
        ..Default::default()
    };
    eframe::run_native(
        "IL2CppDumper GUI Wrapper",
        native_options,
        Box::new(move |_cc| Box::new(App::new(config))),
    );
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("invalid --log-level '{}': {}, using info", directive, err);
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
