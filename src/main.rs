//! Engine utilities - numeric self-check
//!
//! Loads configuration, runs every check in [`engine_utilities::diagnostics`]
//! and prints the report. Exits with status 1 when any check fails.

use engine_utilities::config::AppConfig;
use engine_utilities::diagnostics;

fn main() {
    // Config is loaded before logging exists, so its failure is reported afterwards
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // RUST_LOG still takes precedence over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting engine utilities self-check");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let report = diagnostics::run(&config.diagnostics);
    println!("{}", report);

    if !report.all_passed() {
        std::process::exit(1);
    }
}
