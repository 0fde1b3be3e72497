use log::debug;
use crate::spectrum::axis::AxisRange;
use crate::spectrum::config::MappingPolicy;
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}
impl PlotPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}
/// Plot points for one payload plus what it took to produce them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedCurve {
    pub points: Vec<PlotPoint>,
    pub consumed: usize,
    pub first: Option<PlotPoint>,
    pub last: Option<PlotPoint>,
}
impl MappedCurve {
    pub fn produced(&self) -> usize {
        self.points.len()
    }
}
/// Places `samples` along `x_range`. Points whose x or y is not finite are
/// dropped, never zero-filled.
pub fn map_samples(
    samples: &[f64],
    x_range: &AxisRange,
    policy: MappingPolicy,
    sample_count: Option<usize>,
) -> MappedCurve {
    let n = samples.len();
    // The last stretched sample is pinned to the axis end to avoid rounding drift.
    let (step, pin_last) = match (policy, sample_count) {
        (MappingPolicy::DeclaredStep, Some(count)) if count > 0 => {
            (x_range.span() / count as f64, false)
        }
        (MappingPolicy::DeclaredStep, _) => {
            debug!("no declared step count, stretching {n} samples across the axis");
            (uniform_step(x_range, n), true)
        }
        (MappingPolicy::UniformStretch, _) => (uniform_step(x_range, n), true),
    };
    let points: Vec<PlotPoint> = samples
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let x = if pin_last && n > 1 && i == n - 1 {
                x_range.max
            } else {
                x_range.min + i as f64 * step
            };
            PlotPoint::new(x, y)
        })
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    MappedCurve {
        first: points.first().copied(),
        last: points.last().copied(),
        consumed: n,
        points,
    }
}
fn uniform_step(x_range: &AxisRange, n: usize) -> f64 {
    if n > 1 {
        x_range.span() / (n - 1) as f64
    } else {
        0.0
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    const EPS: f64 = 1e-9;
    fn range(min: f64, max: f64) -> AxisRange {
        AxisRange { min, max }
    }
    #[test]
    fn uniform_mapping_hits_both_ends() {
        let curve = map_samples(
            &[0.0, 5.0, 10.0, 5.0, 0.0],
            &range(792.0, 798.0),
            MappingPolicy::UniformStretch,
            None,
        );
        let expected = [
            (792.0, 0.0),
            (793.5, 5.0),
            (795.0, 10.0),
            (796.5, 5.0),
            (798.0, 0.0),
        ];
        assert_eq!(curve.produced(), 5);
        for (p, (x, y)) in curve.points.iter().zip(expected) {
            assert!((p.x - x).abs() < EPS, "{} != {}", p.x, x);
            assert_eq!(p.y, y);
        }
        assert_eq!(curve.first, Some(PlotPoint::new(792.0, 0.0)));
        assert_eq!(curve.last, Some(PlotPoint::new(798.0, 0.0)));
    }
    #[test]
    fn uniform_mapping_ignores_declared_count() {
        let samples: Vec<f64> = (0..7).map(f64::from).collect();
        let curve = map_samples(&samples, &range(0.3, 1.0), MappingPolicy::UniformStretch, Some(3));
        assert_eq!(curve.last.map(|p| p.x), Some(1.0));
    }
    #[test]
    fn single_sample_sits_on_min() {
        let curve = map_samples(&[4.0], &range(792.0, 798.0), MappingPolicy::UniformStretch, None);
        assert_eq!(curve.points, vec![PlotPoint::new(792.0, 4.0)]);
    }
    #[test]
    fn declared_step_uses_instrument_step() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        let curve = map_samples(&samples, &range(792.0, 798.0), MappingPolicy::DeclaredStep, Some(6));
        for (i, p) in curve.points.iter().enumerate() {
            let expected = 792.0 + i as f64 * (798.0 - 792.0) / 6.0;
            assert!((p.x - expected).abs() < EPS);
        }
        // Falls one step short of the axis end.
        assert!((curve.last.unwrap().x - 796.0).abs() < EPS);
    }
    #[test]
    fn declared_step_without_count_stretches() {
        let curve = map_samples(&[0.0, 1.0, 2.0], &range(10.0, 20.0), MappingPolicy::DeclaredStep, None);
        assert_eq!(curve.last.map(|p| p.x), Some(20.0));
    }
    #[test]
    fn non_finite_samples_are_dropped_not_zeroed() {
        let samples = [1.0, f64::NAN, 3.0, f64::INFINITY, 5.0];
        let curve = map_samples(&samples, &range(0.0, 4.0), MappingPolicy::UniformStretch, None);
        assert_eq!(curve.consumed, 5);
        assert_eq!(curve.produced(), 3);
        assert_eq!(curve.consumed - curve.produced(), 2);
        let xs: Vec<f64> = curve.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
        assert!(curve.points.iter().all(|p| p.y != 0.0));
    }
    #[test]
    fn empty_input_produces_nothing() {
        let curve = map_samples(&[], &range(0.0, 1.0), MappingPolicy::UniformStretch, None);
        assert_eq!(curve, MappedCurve::default());
    }
}
