// src/config.rs
// 面板配置：JSON 文件，缺省字段走默认值
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use crate::spectrum::{AxisConfig, RenderConfig};
pub const DEFAULT_CONFIG_FILE: &str = "seop_panel.json";
pub const CONFIG_ENV_VAR: &str = "SEOP_PANEL_CONFIG";
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub interval_ms: u64,
}
impl RetryConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
impl Default for RetryConfig {
    fn default() -> Self {
        Self { interval_ms: 2000 }
    }
}
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    pub unit_id: u8,
    /// Fraction of spectrum requests the simulated instrument leaves unanswered.
    pub drop_rate: f64,
}
impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "192.168.4.1".to_owned(),
            port: 503,
            unit_id: 1,
            drop_rate: 0.25,
        }
    }
}
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub axis: AxisConfig,
    pub render: RenderConfig,
    pub retry: RetryConfig,
    pub backend: BackendConfig,
}
impl PanelConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid panel configuration")
    }
    /// Loads `path`; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
    /// Path from `SEOP_PANEL_CONFIG`, else `seop_panel.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
