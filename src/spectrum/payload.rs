//! Decoding boundary for spectrum updates coming from the device backend.
//!
//! The backend reports samples either as a JSON array or as a JSON-encoded
//! string holding that array. Both collapse here into one `Vec<f64>` so the
//! renderer never deals with the wire shape.
use log::warn;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use crate::spectrum::error::{Result, SpectrumError};
/// Spectrum update exactly as the backend serializes it. Scalars stay raw so
/// a mistyped field reads as absent instead of failing the whole update.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePayload {
    pub samples: Option<Value>,
    pub raw_samples: Option<Vec<Value>>,
    pub x_min: Option<Value>,
    pub x_max: Option<Value>,
    pub y_min: Option<Value>,
    pub y_max: Option<Value>,
    pub resonance_freq: Option<Value>,
    pub drive_freq: Option<Value>,
    #[serde(alias = "status")]
    pub sample_count: Option<Value>,
}
/// Canonical, decoded spectrum update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpectrumPayload {
    pub samples: Vec<f64>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub resonance_freq: Option<f64>,
    pub drive_freq: Option<f64>,
    /// Authoritative number of steps between `x_min` and `x_max`.
    pub sample_count: Option<usize>,
}
impl SpectrumPayload {
    pub fn with_samples(samples: Vec<f64>) -> Self {
        Self {
            samples,
            ..Default::default()
        }
    }
    /// Parses one backend message. Fails only when the document itself is not
    /// a payload object; unusable samples yield an empty sample list.
    pub fn from_json(text: &str) -> Result<Self> {
        let wire: WirePayload = serde_json::from_str(text)?;
        Ok(Self::from_wire(wire))
    }
    pub fn from_wire(wire: WirePayload) -> Self {
        let primary = match wire.samples.as_ref().map(decode_samples) {
            Some(Ok(samples)) => samples,
            Some(Err(err)) => {
                warn!("spectrum samples unparsable, trying raw field: {err}");
                Vec::new()
            }
            None => Vec::new(),
        };
        let samples = if primary.is_empty() {
            wire.raw_samples
                .as_deref()
                .map(|items| items.iter().map(sample_value).collect())
                .unwrap_or_default()
        } else {
            primary
        };
        Self {
            samples,
            x_min: number(&wire.x_min),
            x_max: number(&wire.x_max),
            y_min: number(&wire.y_min),
            y_max: number(&wire.y_max),
            resonance_freq: number(&wire.resonance_freq),
            drive_freq: number(&wire.drive_freq),
            sample_count: step_count(&wire.sample_count),
        }
    }
    /// True when at least one sample can be plotted.
    pub fn has_finite_samples(&self) -> bool {
        self.samples.iter().any(|v| v.is_finite())
    }
}
fn decode_samples(value: &Value) -> Result<Vec<f64>> {
    match value {
        Value::Array(items) => Ok(items.iter().map(sample_value).collect()),
        Value::String(text) => {
            let items: Vec<Value> = serde_json::from_str(text)?;
            Ok(items.iter().map(sample_value).collect())
        }
        Value::Null => Ok(Vec::new()),
        other => Err(SpectrumError::MalformedSamples(serde_json::Error::custom(
            format!("expected array or encoded array, got {other}"),
        ))),
    }
}
fn number(value: &Option<Value>) -> Option<f64> {
    value.as_ref().and_then(Value::as_f64)
}
// Whole, positive counts only; 2.5 steps means the field is garbage.
fn step_count(value: &Option<Value>) -> Option<usize> {
    let count = number(value)?;
    if count.is_finite() && count >= 1.0 && count.fract() == 0.0 && count <= u32::MAX as f64 {
        Some(count as usize)
    } else {
        if value.is_some() {
            warn!("ignoring sample count {value:?}");
        }
        None
    }
}
// Non-numeric entries keep their slot as NaN so later indices stay aligned.
fn sample_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
