use serde_json::Value;
use crate::models::severity::*;

/// Extract the v3 and v4 metric sets from an NVD `metrics` object.
///
/// v3.1 wins over v3.0 when both are present. v3 and v4 are independent:
/// a missing one is never filled in from the other.
pub fn normalize_severity(metrics: &Value) -> (Option<CvssMetric>, Option<CvssMetric>) {
    let v3 = first_cvss_data(metrics, "cvssMetricV31")
        .and_then(|data| parse_metric(data, CvssVersion::V3_1))
        .or_else(|| {
            first_cvss_data(metrics, "cvssMetricV30")
                .and_then(|data| parse_metric(data, CvssVersion::V3_0))
        });
    let v4 = first_cvss_data(metrics, "cvssMetricV40")
        .and_then(|data| parse_metric(data, CvssVersion::V4_0));
    (v3, v4)
}

fn first_cvss_data<'a>(metrics: &'a Value, key: &str) -> Option<&'a Value> {
    metrics
        .get(key)?
        .as_array()?
        .first()?
        .get("cvssData")
}

fn parse_metric(data: &Value, version: CvssVersion) -> Option<CvssMetric> {
    let score = data
        .get("baseScore")
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite() && (0.0..=10.0).contains(s))?;

    let text = |key: &str| data.get(key).and_then(Value::as_str);
    let is_v4 = version == CvssVersion::V4_0;
    // v4 renames the impact metrics after the vulnerable system
    let (c, i, a) = if is_v4 {
        ("vulnConfidentialityImpact", "vulnIntegrityImpact", "vulnAvailabilityImpact")
    } else {
        ("confidentialityImpact", "integrityImpact", "availabilityImpact")
    };

    Some(CvssMetric {
        version,
        score,
        vector: text("vectorString").map(str::to_string),
        attack_vector: text("attackVector").and_then(AttackVector::parse),
        attack_complexity: text("attackComplexity").and_then(AttackComplexity::parse),
        attack_requirements: if is_v4 {
            text("attackRequirements").and_then(AttackRequirements::parse)
        } else {
            None
        },
        privileges_required: text("privilegesRequired").and_then(PrivilegesRequired::parse),
        user_interaction: text("userInteraction").and_then(UserInteraction::parse),
        scope: text("scope").and_then(Scope::parse),
        confidentiality: text(c).and_then(Impact::parse),
        integrity: text(i).and_then(Impact::parse),
        availability: text(a).and_then(Impact::parse),
    })
}
