use crate::spectrum::axis::{AxisRange, XAxis};
use crate::spectrum::mapper::PlotPoint;
use crate::spectrum::marker::{DashSlots, MarkerSlotPool};
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Resonance,
    Drive,
}
impl MarkerKind {
    pub const ALL: [MarkerKind; 2] = [MarkerKind::Resonance, MarkerKind::Drive];
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Resonance => "Resonance",
            MarkerKind::Drive => "Drive",
        }
    }
}
/// What the renderer draws into.
pub trait ChartSurface {
    type Slots: DashSlots;
    fn set_axes(&mut self, x: XAxis, y: AxisRange);
    /// Clears the curve and appends `points` as one batch.
    fn replace_curve(&mut self, points: Vec<PlotPoint>);
    fn marker_slots(&mut self, marker: MarkerKind) -> &mut Self::Slots;
}
/// Retained chart state the window paints every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumChart {
    x_axis: Option<XAxis>,
    y_axis: Option<AxisRange>,
    curve: Vec<PlotPoint>,
    resonance: MarkerSlotPool,
    drive: MarkerSlotPool,
}
impl SpectrumChart {
    pub fn new(marker_slots: usize) -> Self {
        Self {
            x_axis: None,
            y_axis: None,
            curve: Vec::new(),
            resonance: MarkerSlotPool::with_slots(marker_slots),
            drive: MarkerSlotPool::with_slots(marker_slots),
        }
    }
    pub fn x_axis(&self) -> Option<&XAxis> {
        self.x_axis.as_ref()
    }
    pub fn y_axis(&self) -> Option<&AxisRange> {
        self.y_axis.as_ref()
    }
    pub fn curve(&self) -> &[PlotPoint] {
        &self.curve
    }
    pub fn marker(&self, marker: MarkerKind) -> &MarkerSlotPool {
        match marker {
            MarkerKind::Resonance => &self.resonance,
            MarkerKind::Drive => &self.drive,
        }
    }
    pub fn has_data(&self) -> bool {
        !self.curve.is_empty()
    }
    /// Drops everything drawn, keeping the pool sizes.
    pub fn reset(&mut self) {
        self.x_axis = None;
        self.y_axis = None;
        self.curve.clear();
        self.resonance.clear_all();
        self.drive.clear_all();
    }
}
impl ChartSurface for SpectrumChart {
    type Slots = MarkerSlotPool;
    fn set_axes(&mut self, x: XAxis, y: AxisRange) {
        self.x_axis = Some(x);
        self.y_axis = Some(y);
    }
    fn replace_curve(&mut self, points: Vec<PlotPoint>) {
        self.curve = points;
    }
    fn marker_slots(&mut self, marker: MarkerKind) -> &mut MarkerSlotPool {
        match marker {
            MarkerKind::Resonance => &mut self.resonance,
            MarkerKind::Drive => &mut self.drive,
        }
    }
}
