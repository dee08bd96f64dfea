use tracing::debug;
use super::rules::{DecisionRule, DEFAULT_RULES, FALLBACK, FALLBACK_RULE_NAME};
use super::types::*;

/// Deterministic triage decision over an ordered rule list.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    rules: Vec<DecisionRule>,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self { rules: DEFAULT_RULES.to_vec() }
    }
}

impl DecisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over a custom rule list. An empty list makes every input
    /// fall through to Defer/Track.
    pub fn with_rules(rules: Vec<DecisionRule>) -> Self {
        Self { rules }
    }

    /// Insert a rule at `index` (clamped to the end of the list).
    pub fn insert_rule(&mut self, index: usize, rule: DecisionRule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    pub fn rules(&self) -> &[DecisionRule] {
        &self.rules
    }

    pub fn decide(&self, input: DecisionInput) -> DecisionOutcome {
        let (urgency, action, rule) = self
            .rules
            .iter()
            .find(|r| (r.matches)(&input))
            .map(|r| (r.urgency, r.action, r.name))
            .unwrap_or((FALLBACK.0, FALLBACK.1, FALLBACK_RULE_NAME));

        let steps = vec![
            format!("Exploitation={} ({})", input.exploitation.code(), Exploitation::LEGEND),
            format!("Exposure={} ({})", input.exposure.code(), Exposure::LEGEND),
            format!("TechnicalImpact={} ({})", input.technical_impact.code(), TechnicalImpact::LEGEND),
            format!("→ Outcome: CISA={}, DSOI={}", action.label(), urgency.label()),
        ];
        let rationale = steps.join(" | ");

        debug!(rule, urgency = urgency.label(), action = action.label(), "Decision made");

        DecisionOutcome { input, urgency, action, rule, steps, rationale }
    }
}

/// Decide with the default rule table.
pub fn decide(input: DecisionInput) -> DecisionOutcome {
    DecisionEngine::default().decide(input)
}
