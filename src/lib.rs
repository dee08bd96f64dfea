pub mod errors;
pub mod config;
pub mod models;
pub mod sources;
pub mod cache;
pub mod normalize;
pub mod mapping;
pub mod pipeline;
pub mod decision;
pub mod assessment;
pub mod api;
pub mod cli;

pub use decision::{decide, DecisionEngine, DecisionInput, DecisionOutcome};
pub use errors::{FetchError, TriageError};
pub use models::{EvidenceRecord, VulnId};
pub use pipeline::EvidenceAggregator;
