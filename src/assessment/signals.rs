use serde::Serialize;
use crate::models::EvidenceRecord;
use super::conditions::is_remote;

pub const HIGH_EXPLOIT_PROBABILITY: f64 = 0.20;
pub const CRITICAL_SEVERITY: f64 = 9.0;

/// Boolean flags worth surfacing next to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Signals {
    pub remote: bool,
    pub known_exploited: bool,
    pub high_exploit_probability: bool,
    pub critical_v3: bool,
    pub critical_v4: bool,
}

impl Signals {
    pub fn from_record(record: &EvidenceRecord) -> Self {
        Self {
            remote: is_remote(record.severity_v3(), record.severity_v4()),
            known_exploited: record.is_known_exploited(),
            high_exploit_probability: record
                .exploit_probability()
                .and_then(|p| p.score)
                .is_some_and(|s| s >= HIGH_EXPLOIT_PROBABILITY),
            critical_v3: record.severity_v3().is_some_and(|m| m.score >= CRITICAL_SEVERITY),
            critical_v4: record.severity_v4().is_some_and(|m| m.score >= CRITICAL_SEVERITY),
        }
    }

    /// Short badge names for the flags that are set.
    pub fn badges(&self) -> Vec<&'static str> {
        [
            (self.remote, "REMOTE"),
            (self.known_exploited, "KEV"),
            (self.high_exploit_probability, "HIGH EPSS"),
            (self.critical_v3, "CVSS v3 CRITICAL"),
            (self.critical_v4, "CVSS v4 CRITICAL"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}
