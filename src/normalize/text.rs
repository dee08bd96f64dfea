use std::collections::HashSet;
use serde_json::Value;

/// Pick a description by language preference, falling back to whatever
/// the source listed first.
pub fn normalize_description(descriptions: &Value, preference: &[String]) -> Option<String> {
    let entries: Vec<(&str, &str)> = descriptions
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|d| {
            let lang = d.get("lang").and_then(Value::as_str).unwrap_or_default();
            let value = d.get("value").and_then(Value::as_str)?.trim();
            (!value.is_empty()).then_some((lang, value))
        })
        .collect();

    preference
        .iter()
        .find_map(|wanted| {
            entries
                .iter()
                .find(|(lang, _)| lang.eq_ignore_ascii_case(wanted.trim()))
        })
        .or_else(|| entries.first())
        .map(|(_, value)| value.to_string())
}

/// Reference URLs in source order, blanks and repeats removed.
pub fn normalize_references(references: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    references
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|r| r.get("url").and_then(Value::as_str))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert(url.to_string()))
        .map(str::to_string)
        .collect()
}
