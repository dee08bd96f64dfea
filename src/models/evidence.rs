use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::sources::SourceKind;
use super::identifier::VulnId;
use super::severity::CvssMetric;

/// Exploit prediction score. Each field is `None` when the source omitted it
/// or sent something outside [0, 1]; unknown is never reported as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploitProbability {
    pub score: Option<f64>,
    pub percentile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnownExploited {
    pub flag: bool,
    pub date_added: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPattern {
    /// Bare catalog number, e.g. `66` for CAPEC-66
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedThreat {
    /// The weakness this threat was resolved from
    #[serde(default)]
    pub weakness_id: String,
    pub threat_id: String,
    pub threat_name: String,
    pub category: String,
}

/// Everything known about one vulnerability. Built once by the aggregator and
/// never modified afterwards; consumers only get read access.
///
/// `Option` fields are `None` when the producing source was unavailable or had
/// nothing to say; `degraded_sources` lists which sources failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceRecord {
    pub(crate) id: VulnId,
    pub(crate) in_primary_catalog: bool,
    pub(crate) description: Option<String>,
    pub(crate) severity_v3: Option<CvssMetric>,
    pub(crate) severity_v4: Option<CvssMetric>,
    pub(crate) exploit_probability: Option<ExploitProbability>,
    pub(crate) known_exploited: Option<KnownExploited>,
    pub(crate) weakness_ids: Vec<String>,
    pub(crate) attack_patterns: Option<Vec<AttackPattern>>,
    pub(crate) embedded_threats: Vec<EmbeddedThreat>,
    pub(crate) references: Vec<String>,
    pub(crate) degraded_sources: Vec<SourceKind>,
}

impl EvidenceRecord {
    pub fn id(&self) -> &VulnId {
        &self.id
    }

    /// Whether the severity source had a record for this identifier at all.
    pub fn in_primary_catalog(&self) -> bool {
        self.in_primary_catalog
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn severity_v3(&self) -> Option<&CvssMetric> {
        self.severity_v3.as_ref()
    }

    pub fn severity_v4(&self) -> Option<&CvssMetric> {
        self.severity_v4.as_ref()
    }

    pub fn exploit_probability(&self) -> Option<&ExploitProbability> {
        self.exploit_probability.as_ref()
    }

    /// `None` when the known-exploited catalog could not be consulted.
    pub fn known_exploited(&self) -> Option<&KnownExploited> {
        self.known_exploited.as_ref()
    }

    pub fn is_known_exploited(&self) -> bool {
        self.known_exploited.as_ref().is_some_and(|k| k.flag)
    }

    /// Unique, well-formed weakness ids in the order the source listed them.
    pub fn weakness_ids(&self) -> &[String] {
        &self.weakness_ids
    }

    /// `None` when the weakness catalog could not be obtained.
    pub fn attack_patterns(&self) -> Option<&[AttackPattern]> {
        self.attack_patterns.as_deref()
    }

    pub fn embedded_threats(&self) -> &[EmbeddedThreat] {
        &self.embedded_threats
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    pub fn degraded_sources(&self) -> &[SourceKind] {
        &self.degraded_sources
    }

    pub fn is_complete(&self) -> bool {
        self.degraded_sources.is_empty()
    }
}
