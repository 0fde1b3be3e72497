use thiserror::Error;
pub type Result<T> = std::result::Result<T, SpectrumError>;
#[derive(Debug, Error)]
pub enum SpectrumError {
    #[error("no data: payload carried no usable samples")]
    NoData,
    #[error("malformed sample encoding: {0}")]
    MalformedSamples(#[from] serde_json::Error),
    #[error("marker slot {slot} out of range for a pool of {capacity}")]
    SlotOutOfRange { slot: usize, capacity: usize },
    #[error("surface rejected segment in slot {slot}: {reason}")]
    SegmentRejected { slot: usize, reason: String },
    #[error("failed to render snapshot: {0}")]
    Plot(String),
}
/// Why a dashed marker was suppressed. Carries the offending values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MarkerRejection {
    #[error("non-finite marker input: x={x}, y_lo={y_lo}, y_hi={y_hi}")]
    NonFinite { x: f64, y_lo: f64, y_hi: f64 },
    #[error("empty vertical span: y_lo={y_lo} >= y_hi={y_hi}")]
    EmptySpan { y_lo: f64, y_hi: f64 },
    #[error("marker x={x} outside axis [{x_min}, {x_max}]")]
    OutOfRange { x: f64, x_min: f64, x_max: f64 },
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for SpectrumError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SpectrumError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for SpectrumError {
    fn from(value: image::ImageError) -> Self {
        SpectrumError::Plot(value.to_string())
    }
}
