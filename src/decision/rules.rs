use super::types::*;

/// One row of the decision table: when `matches` holds, the outcome is
/// `(urgency, action)`. Rules are evaluated in order, first match wins.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRule {
    pub name: &'static str,
    pub matches: fn(&DecisionInput) -> bool,
    pub urgency: UrgencyTier,
    pub action: ActionTier,
}

/// Outcome when no rule matches.
pub const FALLBACK: (UrgencyTier, ActionTier) = (UrgencyTier::Defer, ActionTier::Track);
pub const FALLBACK_RULE_NAME: &str = "fallback";

fn active_open(i: &DecisionInput) -> bool {
    i.exploitation == Exploitation::Active && i.exposure == Exposure::Open
}

fn active_limited(i: &DecisionInput) -> bool {
    i.exploitation == Exploitation::Active
        && matches!(i.exposure, Exposure::Controlled | Exposure::Small)
}

fn poc_open_total(i: &DecisionInput) -> bool {
    i.exploitation == Exploitation::PublicPoc
        && i.exposure == Exposure::Open
        && i.technical_impact == TechnicalImpact::Total
}

fn poc_open_partial(i: &DecisionInput) -> bool {
    i.exploitation == Exploitation::PublicPoc
        && i.exposure == Exposure::Open
        && i.technical_impact == TechnicalImpact::Partial
}

fn none_open_total(i: &DecisionInput) -> bool {
    i.exploitation == Exploitation::None
        && i.exposure == Exposure::Open
        && i.technical_impact == TechnicalImpact::Total
}

pub const DEFAULT_RULES: &[DecisionRule] = &[
    DecisionRule {
        name: "active-open",
        matches: active_open,
        urgency: UrgencyTier::Immediate,
        action: ActionTier::Act,
    },
    DecisionRule {
        name: "active-limited-exposure",
        matches: active_limited,
        urgency: UrgencyTier::OutOfCycle,
        action: ActionTier::Act,
    },
    DecisionRule {
        name: "poc-open-total",
        matches: poc_open_total,
        urgency: UrgencyTier::OutOfCycle,
        action: ActionTier::Attend,
    },
    DecisionRule {
        name: "poc-open-partial",
        matches: poc_open_partial,
        urgency: UrgencyTier::Scheduled,
        action: ActionTier::Attend,
    },
    DecisionRule {
        name: "none-open-total",
        matches: none_open_total,
        urgency: UrgencyTier::Scheduled,
        action: ActionTier::TrackStar,
    },
];
