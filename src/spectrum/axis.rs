//! X/Y axis bounds for one spectrum update.
use log::warn;
use crate::spectrum::config::{AxisConfig, YAxisPolicy};
use crate::spectrum::error::{Result, SpectrumError};
use crate::spectrum::payload::SpectrumPayload;
/// Above this many grid lines the tick grid is dropped.
pub const MAX_TICKS: usize = 400;
/// Resolved `{min, max}` pair. Always `max > min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}
impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
    // Swap inverted bounds and open up a degenerate one.
    fn normalized(min: f64, max: f64) -> Self {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        if max > min {
            Self { min, max }
        } else {
            Self { min, max: min + 1.0 }
        }
    }
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XAxis {
    pub range: AxisRange,
    pub tick_anchor: f64,
    pub tick_interval: f64,
}
impl XAxis {
    /// Tick positions from the anchor up to the range maximum. Empty when
    /// the grid would exceed `MAX_TICKS` lines.
    pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        let steps = self.range.span() / self.tick_interval;
        let count = if self.tick_interval.is_nan() || self.tick_interval <= 0.0 {
            1
        } else if steps.is_finite() && steps < MAX_TICKS as f64 {
            (steps.floor() as usize).saturating_add(1)
        } else {
            0
        };
        (0..count).map(move |i| self.tick_anchor + i as f64 * self.tick_interval)
    }
}
pub fn resolve_x(x_min: Option<f64>, x_max: Option<f64>, config: &AxisConfig) -> XAxis {
    let (min, max) = match (x_min, x_max) {
        (Some(min), Some(max)) if min.is_finite() && max.is_finite() => (min, max),
        _ => (config.default_x_min, config.default_x_max),
    };
    let mut range = AxisRange::normalized(min, max);
    if !range.span().is_finite() {
        warn!("x axis [{min}, {max}] has no finite span, using defaults");
        range = AxisRange::normalized(config.default_x_min, config.default_x_max);
    }
    if (range.span() - config.reference_span).abs() <= config.snap_tolerance
        && config.snap_step > 0.0
    {
        range = AxisRange::normalized(
            snap(range.min, config.snap_step),
            snap(range.max, config.snap_step),
        );
    }
    XAxis {
        range,
        tick_anchor: range.min,
        tick_interval: config.tick_interval,
    }
}
fn snap(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
pub fn resolve_y(
    payload: &SpectrumPayload,
    policy: YAxisPolicy,
    config: &AxisConfig,
) -> Result<AxisRange> {
    match policy {
        YAxisPolicy::DataDriven => data_range(&payload.samples, config),
        YAxisPolicy::Declared => match (payload.y_min, payload.y_max) {
            (Some(lo), Some(hi))
                if lo.is_finite() && hi.is_finite() && lo != hi && (hi - lo).is_finite() =>
            {
                Ok(padded(AxisRange::normalized(lo, hi), config))
            }
            _ => data_range(&payload.samples, config),
        },
    }
}
/// Y range from the finite samples, padded. `NoData` when none are finite.
pub fn data_range(samples: &[f64], config: &AxisConfig) -> Result<AxisRange> {
    let (min, max) = samples
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(SpectrumError::NoData)?;
    Ok(padded(AxisRange::normalized(min, max), config))
}
fn padded(range: AxisRange, config: &AxisConfig) -> AxisRange {
    let pad = (range.span() * config.y_padding_fraction).max(config.y_padding_floor);
    AxisRange {
        min: range.min - pad,
        max: range.max + pad,
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    const EPS: f64 = 1e-9;
    fn cfg() -> AxisConfig {
        AxisConfig::default()
    }
    #[test]
    fn missing_or_non_finite_x_falls_back_to_default() {
        let x = resolve_x(None, Some(800.0), &cfg());
        assert_eq!(x.range, AxisRange { min: 792.0, max: 798.0 });
        let x = resolve_x(Some(f64::NAN), Some(800.0), &cfg());
        assert_eq!(x.range, AxisRange { min: 792.0, max: 798.0 });
        let x = resolve_x(Some(790.0), Some(f64::INFINITY), &cfg());
        assert_eq!(x.range.min, 792.0);
    }
    #[test]
    fn inverted_and_degenerate_x_are_repaired() {
        let x = resolve_x(Some(810.0), Some(800.0), &cfg());
        assert_eq!(x.range, AxisRange { min: 800.0, max: 810.0 });
        let x = resolve_x(Some(795.0), Some(795.0), &cfg());
        assert_eq!(x.range, AxisRange { min: 795.0, max: 796.0 });
    }
    #[test]
    fn span_near_reference_snaps_to_half_steps() {
        let x = resolve_x(Some(792.3), Some(798.1), &cfg());
        assert!((x.range.min - 792.5).abs() < EPS);
        assert!((x.range.max - 798.0).abs() < EPS);
        assert_eq!(x.tick_anchor, x.range.min);
        assert_eq!(x.tick_interval, 0.5);
    }
    #[test]
    fn span_far_from_reference_is_left_alone() {
        let x = resolve_x(Some(790.13), Some(800.27), &cfg());
        assert_eq!(x.range, AxisRange { min: 790.13, max: 800.27 });
    }
    #[test]
    fn ticks_start_at_anchor() {
        let x = resolve_x(Some(792.0), Some(798.0), &cfg());
        let ticks: Vec<f64> = x.ticks().collect();
        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks[0], 792.0);
        assert!((ticks[12] - 798.0).abs() < EPS);
    }
    #[test]
    fn overflowing_x_span_falls_back_to_default() {
        let x = resolve_x(Some(-1e308), Some(1e308), &cfg());
        assert_eq!(x.range, AxisRange { min: 792.0, max: 798.0 });
        assert_eq!(x.ticks().count(), 13);
    }
    #[test]
    fn huge_finite_span_drops_the_grid() {
        let x = resolve_x(Some(0.0), Some(1e9), &cfg());
        assert_eq!(x.range, AxisRange { min: 0.0, max: 1e9 });
        assert_eq!(x.ticks().count(), 0);
        let x = resolve_x(Some(0.0), Some(150.0), &cfg());
        assert_eq!(x.ticks().count(), 301);
    }
    #[test]
    fn huge_x_span_still_maps_every_sample() {
        use crate::spectrum::config::MappingPolicy;
        use crate::spectrum::mapper::map_samples;
        let x = resolve_x(Some(-1e308), Some(1e308), &cfg());
        let curve = map_samples(&[1.0, 2.0, 3.0], &x.range, MappingPolicy::UniformStretch, None);
        assert_eq!(curve.produced(), 3);
        assert!(curve.points.iter().all(|p| p.x.is_finite()));
    }
    #[test]
    fn declared_y_with_overflowing_span_uses_samples() {
        let mut payload = SpectrumPayload::with_samples(vec![0.0, 10.0]);
        payload.y_min = Some(-1e308);
        payload.y_max = Some(1e308);
        let y = resolve_y(&payload, YAxisPolicy::Declared, &cfg()).unwrap();
        assert!((y.min + 0.5).abs() < EPS);
        assert!((y.max - 10.5).abs() < EPS);
    }
    #[test]
    fn data_driven_y_is_padded_symmetrically() {
        let payload = SpectrumPayload::with_samples(vec![2.0, f64::NAN, 12.0, 7.0]);
        let y = resolve_y(&payload, YAxisPolicy::DataDriven, &cfg()).unwrap();
        assert!((y.min - 1.5).abs() < EPS);
        assert!((y.max - 12.5).abs() < EPS);
        assert!(y.span() >= 10.0 * 1.05);
        assert!(((y.min + y.max) / 2.0 - 7.0).abs() < EPS);
    }
    #[test]
    fn flat_data_is_widened_then_floored() {
        let payload = SpectrumPayload::with_samples(vec![3.0, 3.0]);
        let y = resolve_y(&payload, YAxisPolicy::DataDriven, &cfg()).unwrap();
        assert!((y.min - 2.9).abs() < EPS);
        assert!((y.max - 4.1).abs() < EPS);
    }
    #[test]
    fn declared_y_preferred_and_swapped() {
        let mut payload = SpectrumPayload::with_samples(vec![0.0, 1.0]);
        payload.y_min = Some(100.0);
        payload.y_max = Some(-100.0);
        let y = resolve_y(&payload, YAxisPolicy::Declared, &cfg()).unwrap();
        assert!((y.min + 110.0).abs() < EPS);
        assert!((y.max - 110.0).abs() < EPS);
    }
    #[test]
    fn declared_y_equal_falls_back_to_samples() {
        let mut payload = SpectrumPayload::with_samples(vec![0.0, 10.0]);
        payload.y_min = Some(5.0);
        payload.y_max = Some(5.0);
        let y = resolve_y(&payload, YAxisPolicy::Declared, &cfg()).unwrap();
        assert!((y.min + 0.5).abs() < EPS);
        assert!((y.max - 10.5).abs() < EPS);
    }
    #[test]
    fn no_finite_samples_is_no_data() {
        let payload = SpectrumPayload::with_samples(vec![f64::NAN, f64::INFINITY]);
        assert!(matches!(
            resolve_y(&payload, YAxisPolicy::DataDriven, &cfg()),
            Err(SpectrumError::NoData)
        ));
        assert!(matches!(
            data_range(&[], &cfg()),
            Err(SpectrumError::NoData)
        ));
    }
}
