// src/spectrum/mod.rs
// 光谱曲线渲染核心：坐标轴、采样映射、虚线标记、重试定时器
pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod mapper;
pub mod marker;
pub mod payload;
pub mod renderer;
pub mod retry;
// 公开导出，方便外部调用
pub use chart::{MarkerKind, SpectrumChart};
pub use config::{AxisConfig, MappingPolicy, RenderConfig, YAxisPolicy};
pub use error::SpectrumError;
pub use payload::SpectrumPayload;
pub use renderer::{RenderReport, SpectrumRenderer};
pub use retry::RetryScheduler;
