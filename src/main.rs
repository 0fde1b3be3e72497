// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod backend;
mod config;
mod engine;
mod export;
mod gui;
mod params;
mod spectrum;
mod types;
use anyhow::{anyhow, Context};
use eframe::egui;
use log::info;
use config::PanelConfig;
// 入口函数
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let path = PanelConfig::default_path();
    let config = PanelConfig::load(&path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    info!(
        "mapping={:?}, y_policy={:?}, retry every {:?}",
        config.render.mapping,
        config.render.y_policy,
        config.retry.interval()
    );
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size([960.0, 600.0])
        .with_title("SEOP Panel");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "SEOP Panel",
        options,
        Box::new(move |_cc| Box::new(gui::SeopPanelApp::new(config))),
    )
    .map_err(|err| anyhow!("window failed: {err}"))
}
