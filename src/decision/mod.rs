pub mod types;
pub mod rules;
pub mod engine;

pub use types::*;
pub use rules::{DecisionRule, DEFAULT_RULES, FALLBACK, FALLBACK_RULE_NAME};
pub use engine::{decide, DecisionEngine};
