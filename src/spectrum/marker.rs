//! Dashed vertical markers built from plain two-point segments.
//!
//! The chart has no dashed stroke, so a marker is faked with a fixed pool of
//! reusable segment slots. The vertical span is cut into `2 * slots` equal
//! bands; every even band gets a dash, every odd band stays empty.
use log::warn;
use crate::spectrum::error::{MarkerRejection, Result, SpectrumError};
/// A vertical dash at constant `x`, from `y0` up to `y1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}
impl Segment {
    pub fn endpoints(&self) -> [[f64; 2]; 2] {
        [[self.x, self.y0], [self.x, self.y1]]
    }
    /// Finite and running strictly upwards.
    pub fn is_drawable(&self) -> bool {
        self.x.is_finite() && self.y0.is_finite() && self.y1.is_finite() && self.y1 > self.y0
    }
}
/// Anything that holds a fixed number of dash slots.
pub trait DashSlots {
    fn slot_count(&self) -> usize;
    fn clear_all(&mut self);
    fn put(&mut self, slot: usize, dash: Segment) -> Result<()>;
}
/// Fixed-size pool of segment slots. Never resized after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSlotPool {
    slots: Vec<Option<Segment>>,
}
impl MarkerSlotPool {
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }
    pub fn slots(&self) -> &[Option<Segment>] {
        &self.slots
    }
    pub fn dashes(&self) -> impl Iterator<Item = &Segment> {
        self.slots.iter().flatten()
    }
    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
impl DashSlots for MarkerSlotPool {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }
    fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
    fn put(&mut self, slot: usize, dash: Segment) -> Result<()> {
        let capacity = self.slots.len();
        if !dash.is_drawable() {
            return Err(SpectrumError::SegmentRejected {
                slot,
                reason: format!("degenerate dash {dash:?}"),
            });
        }
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(SpectrumError::SlotOutOfRange { slot, capacity })?;
        *target = Some(dash);
        Ok(())
    }
}
/// What a successful marker render produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkerOutcome {
    pub drawn: usize,
    pub failed: usize,
}
/// Repaints `pool` as a dashed vertical line at `x_val`.
///
/// The pool is always cleared first. An invalid position leaves it cleared and
/// returns the rejection. A slot that refuses its dash is logged and skipped.
pub fn render_dashed_marker<P: DashSlots + ?Sized>(
    pool: &mut P,
    x_val: f64,
    y_lo: f64,
    y_hi: f64,
    x_min: f64,
    x_max: f64,
) -> std::result::Result<MarkerOutcome, MarkerRejection> {
    pool.clear_all();
    if !(x_val.is_finite() && y_lo.is_finite() && y_hi.is_finite()) {
        return Err(MarkerRejection::NonFinite { x: x_val, y_lo, y_hi });
    }
    if y_hi <= y_lo {
        return Err(MarkerRejection::EmptySpan { y_lo, y_hi });
    }
    if x_val < x_min || x_val > x_max {
        return Err(MarkerRejection::OutOfRange { x: x_val, x_min, x_max });
    }
    let slots = pool.slot_count();
    let mut outcome = MarkerOutcome::default();
    if slots == 0 {
        return Ok(outcome);
    }
    let band = (y_hi - y_lo) / (2 * slots) as f64;
    for i in 0..slots {
        let start = y_lo + (2 * i) as f64 * band;
        if start >= y_hi {
            break;
        }
        let end = (y_lo + (2 * i + 1) as f64 * band).min(y_hi);
        let dash = Segment {
            x: x_val,
            y0: start,
            y1: end,
        };
        match pool.put(i, dash) {
            Ok(()) => outcome.drawn += 1,
            Err(err) => {
                warn!("dash {i} at x={x_val} skipped: {err}");
                outcome.failed += 1;
            }
        }
    }
    Ok(outcome)
}
#[cfg(test)]
mod tests {
    use super::*;
    const EPS: f64 = 1e-9;
    /// Pool whose listed slots refuse every dash.
    struct FlakyPool {
        inner: MarkerSlotPool,
        broken: Vec<usize>,
    }
    impl DashSlots for FlakyPool {
        fn slot_count(&self) -> usize {
            self.inner.slot_count()
        }
        fn clear_all(&mut self) {
            self.inner.clear_all();
        }
        fn put(&mut self, slot: usize, dash: Segment) -> Result<()> {
            if self.broken.contains(&slot) {
                return Err(SpectrumError::SegmentRejected {
                    slot,
                    reason: "surface busy".into(),
                });
            }
            self.inner.put(slot, dash)
        }
    }
    #[test]
    fn dashes_fill_even_bands() {
        let mut pool = MarkerSlotPool::with_slots(12);
        let outcome = render_dashed_marker(&mut pool, 795.0, 0.0, 24.0, 792.0, 798.0).unwrap();
        assert_eq!(outcome, MarkerOutcome { drawn: 12, failed: 0 });
        for (i, slot) in pool.slots().iter().enumerate() {
            let dash = slot.unwrap();
            assert_eq!(dash.x, 795.0);
            assert!((dash.y0 - 2.0 * i as f64).abs() < EPS);
            assert!((dash.y1 - (2.0 * i as f64 + 1.0)).abs() < EPS);
        }
    }
    #[test]
    fn render_is_idempotent() {
        let mut pool = MarkerSlotPool::with_slots(12);
        render_dashed_marker(&mut pool, 794.2, -3.0, 7.5, 792.0, 798.0).unwrap();
        let first = pool.clone();
        render_dashed_marker(&mut pool, 794.2, -3.0, 7.5, 792.0, 798.0).unwrap();
        assert_eq!(pool, first);
    }
    #[test]
    fn out_of_range_clears_stale_dashes() {
        let mut pool = MarkerSlotPool::with_slots(12);
        render_dashed_marker(&mut pool, 795.0, 0.0, 1.0, 792.0, 798.0).unwrap();
        assert!(!pool.is_clear());
        let err = render_dashed_marker(&mut pool, 799.5, 0.0, 1.0, 792.0, 798.0).unwrap_err();
        assert_eq!(
            err,
            MarkerRejection::OutOfRange { x: 799.5, x_min: 792.0, x_max: 798.0 }
        );
        assert!(pool.is_clear());
        assert_eq!(pool.slot_count(), 12);
    }
    #[test]
    fn bounds_are_inclusive() {
        let mut pool = MarkerSlotPool::with_slots(4);
        assert!(render_dashed_marker(&mut pool, 792.0, 0.0, 1.0, 792.0, 798.0).is_ok());
        assert!(render_dashed_marker(&mut pool, 798.0, 0.0, 1.0, 792.0, 798.0).is_ok());
    }
    #[test]
    fn invalid_inputs_are_rejected() {
        let mut pool = MarkerSlotPool::with_slots(4);
        assert!(matches!(
            render_dashed_marker(&mut pool, f64::NAN, 0.0, 1.0, 0.0, 10.0),
            Err(MarkerRejection::NonFinite { .. })
        ));
        assert!(matches!(
            render_dashed_marker(&mut pool, 5.0, 1.0, 1.0, 0.0, 10.0),
            Err(MarkerRejection::EmptySpan { .. })
        ));
        assert!(matches!(
            render_dashed_marker(&mut pool, 5.0, 2.0, 1.0, 0.0, 10.0),
            Err(MarkerRejection::EmptySpan { .. })
        ));
        assert!(pool.is_clear());
    }
    #[test]
    fn failing_slot_does_not_stop_the_rest() {
        let mut pool = FlakyPool {
            inner: MarkerSlotPool::with_slots(6),
            broken: vec![1, 3],
        };
        let outcome = render_dashed_marker(&mut pool, 5.0, 0.0, 12.0, 0.0, 10.0).unwrap();
        assert_eq!(outcome, MarkerOutcome { drawn: 4, failed: 2 });
        let filled: Vec<bool> = pool.inner.slots().iter().map(Option::is_some).collect();
        assert_eq!(filled, vec![true, false, true, false, true, true]);
    }
    #[test]
    fn put_outside_pool_is_an_error() {
        let mut pool = MarkerSlotPool::with_slots(2);
        let dash = Segment { x: 0.0, y0: 0.0, y1: 1.0 };
        assert!(matches!(
            pool.put(2, dash),
            Err(SpectrumError::SlotOutOfRange { slot: 2, capacity: 2 })
        ));
    }
    #[test]
    fn pool_refuses_degenerate_dash() {
        let mut pool = MarkerSlotPool::with_slots(2);
        let flat = Segment { x: 1.0, y0: 2.0, y1: 2.0 };
        assert!(matches!(
            pool.put(0, flat),
            Err(SpectrumError::SegmentRejected { slot: 0, .. })
        ));
        let nan = Segment { x: f64::NAN, y0: 0.0, y1: 1.0 };
        assert!(pool.put(1, nan).is_err());
        assert!(pool.is_clear());
    }
}
