use serde::Serialize;
use crate::models::severity::*;

/// Which metric set the exploit conditions were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionSource {
    V3,
    V4,
    Unavailable,
}

/// Exploitability conditions and impacts, laid out for someone choosing
/// exposure and technical impact by hand.
///
/// Conditions come from v3 when present, otherwise v4. Attack requirements
/// only exist in v4, so they are reported only for a v4-sourced set. The
/// confidentiality/integrity/availability impacts are read from v3 only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploitConditions {
    pub source: ConditionSource,
    pub attack_vector: Option<AttackVector>,
    pub attack_complexity: Option<AttackComplexity>,
    pub attack_requirements: Option<AttackRequirements>,
    pub privileges_required: Option<PrivilegesRequired>,
    pub user_interaction: Option<UserInteraction>,
    pub scope: Option<Scope>,
    pub confidentiality: Option<Impact>,
    pub integrity: Option<Impact>,
    pub availability: Option<Impact>,
    pub remote: bool,
}

impl ExploitConditions {
    pub fn derive(v3: Option<&CvssMetric>, v4: Option<&CvssMetric>) -> Self {
        let (source, primary) = match (v3, v4) {
            (Some(m), _) => (ConditionSource::V3, Some(m)),
            (None, Some(m)) => (ConditionSource::V4, Some(m)),
            (None, None) => (ConditionSource::Unavailable, None),
        };

        Self {
            source,
            attack_vector: primary.and_then(|m| m.attack_vector),
            attack_complexity: primary.and_then(|m| m.attack_complexity),
            attack_requirements: primary
                .filter(|_| source == ConditionSource::V4)
                .and_then(|m| m.attack_requirements),
            privileges_required: primary.and_then(|m| m.privileges_required),
            user_interaction: primary.and_then(|m| m.user_interaction),
            scope: primary.and_then(|m| m.scope),
            confidentiality: v3.and_then(|m| m.confidentiality),
            integrity: v3.and_then(|m| m.integrity),
            availability: v3.and_then(|m| m.availability),
            remote: is_remote(v3, v4),
        }
    }

    /// `(short name, value)` pairs for the conditions that are known.
    pub fn labelled(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("AV", self.attack_vector.map(|v| v.as_str())),
            ("AC", self.attack_complexity.map(|v| v.as_str())),
            ("AT", self.attack_requirements.map(|v| v.as_str())),
            ("PR", self.privileges_required.map(|v| v.as_str())),
            ("UI", self.user_interaction.map(|v| v.as_str())),
            ("S", self.scope.map(|v| v.as_str())),
            ("C", self.confidentiality.map(|v| v.as_str())),
            ("I", self.integrity.map(|v| v.as_str())),
            ("A", self.availability.map(|v| v.as_str())),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}

/// Reachable over the network according to either CVSS version.
pub fn is_remote(v3: Option<&CvssMetric>, v4: Option<&CvssMetric>) -> bool {
    [v3, v4]
        .into_iter()
        .flatten()
        .any(|m| m.attack_vector == Some(AttackVector::Network))
}
