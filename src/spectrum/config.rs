use serde::Deserialize;
/// How sample indices are placed on the X axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingPolicy {
    /// First sample on `x_min`, last sample on `x_max`, evenly spaced between.
    UniformStretch,
    /// Step by `(x_max - x_min) / sample_count` as declared by the instrument.
    /// The last sample may fall short of `x_max`.
    DeclaredStep,
}
impl Default for MappingPolicy {
    fn default() -> Self {
        MappingPolicy::UniformStretch
    }
}
/// Where the Y range comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YAxisPolicy {
    /// Min/max of the finite samples.
    DataDriven,
    /// Payload-declared `yMin`/`yMax`, falling back to the samples.
    Declared,
}
impl Default for YAxisPolicy {
    fn default() -> Self {
        YAxisPolicy::DataDriven
    }
}
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Used when the payload does not declare a finite X range.
    pub default_x_min: f64,
    pub default_x_max: f64,
    /// Native span of the instrument sweep; spans near it get snapped.
    pub reference_span: f64,
    pub snap_tolerance: f64,
    pub snap_step: f64,
    pub tick_interval: f64,
    /// Y padding as a fraction of the range, per side.
    pub y_padding_fraction: f64,
    pub y_padding_floor: f64,
}
impl Default for AxisConfig {
    fn default() -> Self {
        // Rb D1 sweep window of the laser head, in nm.
        Self {
            default_x_min: 792.0,
            default_x_max: 798.0,
            reference_span: 6.0,
            snap_tolerance: 1.0,
            snap_step: 0.5,
            tick_interval: 0.5,
            y_padding_fraction: 0.05,
            y_padding_floor: 0.1,
        }
    }
}
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mapping: MappingPolicy,
    pub y_policy: YAxisPolicy,
    /// Number of dash slots per marker. Fixed for the lifetime of the chart.
    pub marker_slots: usize,
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mapping: MappingPolicy::default(),
            y_policy: YAxisPolicy::default(),
            marker_slots: 12,
        }
    }
}
