use log::{debug, warn};
use crate::spectrum::axis::{resolve_x, resolve_y, AxisRange, XAxis};
use crate::spectrum::chart::{ChartSurface, MarkerKind};
use crate::spectrum::config::{AxisConfig, RenderConfig};
use crate::spectrum::error::{MarkerRejection, Result, SpectrumError};
use crate::spectrum::mapper::{map_samples, PlotPoint};
use crate::spectrum::marker::{render_dashed_marker, MarkerOutcome};
use crate::spectrum::payload::SpectrumPayload;
/// Diagnostics for one successful `update_graph`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    pub x_axis: XAxis,
    pub y_axis: AxisRange,
    pub consumed: usize,
    pub produced: usize,
    pub first: Option<PlotPoint>,
    pub last: Option<PlotPoint>,
    pub resonance: std::result::Result<MarkerOutcome, MarkerRejection>,
    pub drive: std::result::Result<MarkerOutcome, MarkerRejection>,
}
impl RenderReport {
    pub fn marker(&self, kind: MarkerKind) -> &std::result::Result<MarkerOutcome, MarkerRejection> {
        match kind {
            MarkerKind::Resonance => &self.resonance,
            MarkerKind::Drive => &self.drive,
        }
    }
}
/// Turns spectrum payloads into curve and marker state on a chart surface.
#[derive(Clone, Debug, Default)]
pub struct SpectrumRenderer {
    axis: AxisConfig,
    render: RenderConfig,
}
impl SpectrumRenderer {
    pub fn new(axis: AxisConfig, render: RenderConfig) -> Self {
        Self { axis, render }
    }
    /// Renders one payload. Returns `NoData` without touching `surface` when
    /// the payload has no finite samples, so the previous chart stays up.
    pub fn update_graph<S: ChartSurface>(
        &self,
        surface: &mut S,
        payload: &SpectrumPayload,
    ) -> Result<RenderReport> {
        if !payload.has_finite_samples() {
            return Err(SpectrumError::NoData);
        }
        let y_axis = resolve_y(payload, self.render.y_policy, &self.axis)?;
        let x_axis = resolve_x(payload.x_min, payload.x_max, &self.axis);
        let curve = map_samples(
            &payload.samples,
            &x_axis.range,
            self.render.mapping,
            payload.sample_count,
        );
        debug!(
            "spectrum mapped: {} samples -> {} points, first={:?}, last={:?}",
            curve.consumed,
            curve.produced(),
            curve.first,
            curve.last
        );
        let (consumed, produced, first, last) =
            (curve.consumed, curve.produced(), curve.first, curve.last);
        surface.set_axes(x_axis, y_axis);
        surface.replace_curve(curve.points);
        let resonance = self.paint_marker(surface, MarkerKind::Resonance, payload.resonance_freq, &x_axis, &y_axis);
        let drive = self.paint_marker(surface, MarkerKind::Drive, payload.drive_freq, &x_axis, &y_axis);
        Ok(RenderReport {
            x_axis,
            y_axis,
            consumed,
            produced,
            first,
            last,
            resonance,
            drive,
        })
    }
    fn paint_marker<S: ChartSurface>(
        &self,
        surface: &mut S,
        kind: MarkerKind,
        position: Option<f64>,
        x_axis: &XAxis,
        y_axis: &AxisRange,
    ) -> std::result::Result<MarkerOutcome, MarkerRejection> {
        let outcome = render_dashed_marker(
            surface.marker_slots(kind),
            position.unwrap_or(f64::NAN),
            y_axis.min,
            y_axis.max,
            x_axis.range.min,
            x_axis.range.max,
        );
        if let Err(rejection) = &outcome {
            warn!("{} marker suppressed: {rejection}", kind.label());
        }
        outcome
    }
}
