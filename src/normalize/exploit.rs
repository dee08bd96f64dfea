use serde_json::Value;
use crate::models::ExploitProbability;

/// Normalize an EPSS response. Only the first record counts; an empty list
/// or a record with no usable numbers yields `None`.
pub fn normalize_exploit_probability(payload: &Value) -> Option<ExploitProbability> {
    let record = payload.get("data")?.as_array()?.first()?;
    let score = record.get("epss").and_then(probability);
    let percentile = record.get("percentile").and_then(probability);
    if score.is_none() && percentile.is_none() {
        return None;
    }
    Some(ExploitProbability { score, percentile })
}

/// EPSS serves numbers as strings (`"0.97565"`); accept both forms.
fn probability(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (value.is_finite() && (0.0..=1.0).contains(&value)).then_some(value)
}
