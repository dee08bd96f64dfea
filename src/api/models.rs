use serde::{Deserialize, Serialize};
use crate::assessment::Assessment;
use crate::decision::{DecisionInput, DecisionOutcome};
use crate::mapping::ThreatLink;
use crate::models::EvidenceRecord;

/// Optional context for `GET /api/evidence/:id`. Exploitation, exposure
/// and impact feed the suggested decision; status drives the review cadence.
#[derive(Debug, Default, Deserialize)]
pub struct EvidenceQuery {
    pub exploitation: Option<String>,
    pub exposure: Option<String>,
    pub impact: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct EvidenceResponse {
    pub evidence: EvidenceRecord,
    pub assessment: Assessment,
    pub suggested_input: DecisionInput,
    pub decision: DecisionOutcome,
}

#[derive(Serialize)]
pub struct ThreatResponse {
    pub weakness_id: String,
    pub table_version: String,
    pub count: usize,
    pub threats: Vec<ThreatLink>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
