// src/main.rs

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use anyhow::Context;

use myhdf5::config::IntakeConfig;
use myhdf5::infrastructure::TempArtifact;
use myhdf5::integrations::capture_launch_argument;

fn main() -> anyhow::Result<()> {
    // 1. LOGGING
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. CONFIGURATION
    let config = IntakeConfig::load().context("Failed to load intake configuration")?;

    // 3. LAUNCH ARGUMENT (file association hand-over)
    let marker = TempArtifact::new(&config.marker_file_name)?;
    if let Err(e) = capture_launch_argument(std::env::args(), &marker) {
        log::warn!("Could not record launch argument: {}", e);
    }

    // 4. TAURI BOOTSTRAP
    myhdf5::app::run(config)
}
