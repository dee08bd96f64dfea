//! Pure translation from each source's native shape into canonical fields.
//! Nothing in here performs I/O or fails: bad input turns into "unknown".

pub mod severity;
pub mod exploit;
pub mod known_exploited;
pub mod weakness;
pub mod text;

pub use severity::normalize_severity;
pub use exploit::normalize_exploit_probability;
pub use known_exploited::normalize_known_exploited;
pub use weakness::{normalize_weakness_id, normalize_weaknesses};
pub use text::{normalize_description, normalize_references};

use serde_json::Value;
use crate::models::CvssMetric;

/// Fields pulled out of one severity-source response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaryEvidence {
    /// False when the source answered with zero records for the identifier
    pub found: bool,
    pub description: Option<String>,
    pub severity_v3: Option<CvssMetric>,
    pub severity_v4: Option<CvssMetric>,
    pub weakness_ids: Vec<String>,
    pub references: Vec<String>,
}

/// Normalize an NVD `cves/2.0` response. Only the first vulnerability entry
/// is considered.
pub fn normalize_primary(payload: &Value, language_preference: &[String]) -> PrimaryEvidence {
    let Some(cve) = payload
        .get("vulnerabilities")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(|entry| entry.get("cve"))
    else {
        return PrimaryEvidence::default();
    };

    let (severity_v3, severity_v4) = normalize_severity(&cve["metrics"]);
    PrimaryEvidence {
        found: true,
        description: normalize_description(&cve["descriptions"], language_preference),
        severity_v3,
        severity_v4,
        weakness_ids: normalize_weaknesses(&cve["weaknesses"]),
        references: normalize_references(&cve["references"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_primary_full_record() {
        let payload = json!({
            "resultsPerPage": 1,
            "totalResults": 1,
            "vulnerabilities": [{ "cve": {
                "id": "CVE-2021-44228",
                "descriptions": [{ "lang": "en", "value": "Apache Log4j2 JNDI features do not protect against attacker controlled LDAP." }],
                "metrics": { "cvssMetricV31": [{ "cvssData": {
                    "baseScore": 10.0,
                    "attackVector": "NETWORK",
                    "attackComplexity": "LOW",
                    "privilegesRequired": "NONE",
                    "userInteraction": "NONE",
                    "scope": "CHANGED",
                    "confidentialityImpact": "HIGH",
                    "integrityImpact": "HIGH",
                    "availabilityImpact": "HIGH"
                }}]},
                "weaknesses": [{ "description": [
                    { "lang": "en", "value": "CWE-502" },
                    { "lang": "en", "value": "CWE-400" },
                    { "lang": "en", "value": "CWE-20" }
                ]}],
                "references": [{ "url": "https://logging.apache.org/log4j/2.x/security.html" }]
            }}]
        });

        let primary = normalize_primary(&payload, &["fr".into(), "en".into()]);
        assert!(primary.found);
        assert!(primary.description.unwrap().starts_with("Apache Log4j2"));
        assert_eq!(primary.severity_v3.unwrap().score, 10.0);
        assert!(primary.severity_v4.is_none());
        assert_eq!(primary.weakness_ids, vec!["CWE-502", "CWE-400", "CWE-20"]);
        assert_eq!(primary.references.len(), 1);
    }

    #[test]
    fn test_normalize_primary_zero_records() {
        let primary = normalize_primary(&json!({ "totalResults": 0, "vulnerabilities": [] }), &[]);
        assert_eq!(primary, PrimaryEvidence::default());
        assert!(!primary.found);
    }
}
