use std::collections::HashSet;
use std::sync::LazyLock;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

static WEAKNESS_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CWE-\d+$").expect("weakness id pattern is valid"));

/// Canonicalize one weakness reference. Bare numbers (`"119"`) gain the
/// `CWE-` prefix; placeholders such as `NVD-CWE-noinfo` are rejected.
pub fn normalize_weakness_id(raw: &str) -> Option<String> {
    let upper = raw.trim().to_ascii_uppercase();
    if !upper.is_empty() && upper.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("CWE-{}", upper));
    }
    WEAKNESS_ID_RE.is_match(&upper).then_some(upper)
}

/// Collect weakness ids from the NVD `weaknesses` array, in source order,
/// without duplicates. Malformed entries are dropped, not kept.
pub fn normalize_weaknesses(weaknesses: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    let values = weaknesses
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|w| w.get("description").and_then(Value::as_array))
        .flatten()
        .filter_map(|d| d.get("value").and_then(Value::as_str));

    for raw in values {
        match normalize_weakness_id(raw) {
            Some(id) => {
                if seen.insert(id.clone()) {
                    ids.push(id);
                }
            }
            None => debug!(value = %raw, "Dropping malformed weakness id"),
        }
    }
    ids
}
