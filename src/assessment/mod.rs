//! Derived views over an evidence record: exploit conditions, signals,
//! watch priority and a suggested decision input.

pub mod conditions;
pub mod signals;
pub mod priority;

pub use conditions::{is_remote, ConditionSource, ExploitConditions};
pub use signals::Signals;
pub use priority::{review_schedule, PriorityLevel, ReviewSchedule, TrackingStatus, WatchPriority};

use chrono::NaiveDate;
use serde::Serialize;
use crate::decision::{DecisionInput, Exploitation, Exposure, TechnicalImpact};
use crate::models::EvidenceRecord;

/// Starting point for a decision. Known exploitation implies `Active`;
/// exposure and technical impact depend on the deployment and must come
/// from the caller.
pub fn suggest_input(
    record: &EvidenceRecord,
    exposure: Option<Exposure>,
    technical_impact: Option<TechnicalImpact>,
) -> DecisionInput {
    let exploitation = if record.is_known_exploited() {
        Exploitation::Active
    } else {
        Exploitation::None
    };
    DecisionInput::new(exploitation, exposure.unwrap_or_default(), technical_impact.unwrap_or_default())
}

/// Everything derived from one record, computed in one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub conditions: ExploitConditions,
    pub signals: Signals,
    pub priority: WatchPriority,
    pub review: ReviewSchedule,
}

impl Assessment {
    pub fn of(record: &EvidenceRecord, status: TrackingStatus, last_review: NaiveDate) -> Self {
        let conditions = ExploitConditions::derive(record.severity_v3(), record.severity_v4());
        let signals = Signals::from_record(record);
        let epss = record.exploit_probability().and_then(|p| p.score);
        let priority = WatchPriority::compute(signals.remote, signals.known_exploited, epss);
        let review = review_schedule(priority.level, status, last_review);
        Self { conditions, signals, priority, review }
    }
}
