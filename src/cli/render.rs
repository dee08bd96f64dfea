use std::fmt::Write;
use console::{style, StyledObject};
use crate::assessment::{Assessment, PriorityLevel};
use crate::decision::{ActionTier, DecisionOutcome, UrgencyTier};
use crate::mapping::ThreatLink;
use crate::models::{CvssMetric, EmbeddedThreat, EvidenceRecord};

const UNKNOWN: &str = "-";

pub fn urgency_badge(urgency: UrgencyTier) -> StyledObject<&'static str> {
    let s = style(urgency.label()).bold();
    match urgency {
        UrgencyTier::Immediate => s.red(),
        UrgencyTier::OutOfCycle => s.color256(208), // orange
        UrgencyTier::Scheduled => s.yellow(),
        UrgencyTier::Defer => s.green(),
    }
}

pub fn action_badge(action: ActionTier) -> StyledObject<&'static str> {
    let s = style(action.label()).bold();
    match action {
        ActionTier::Act => s.red(),
        ActionTier::Attend => s.yellow(),
        ActionTier::TrackStar => s.cyan(),
        ActionTier::Track => s.green(),
    }
}

fn priority_badge(level: PriorityLevel) -> StyledObject<&'static str> {
    let s = style(level.as_str()).bold();
    match level {
        PriorityLevel::Critical => s.red(),
        PriorityLevel::High => s.color256(208),
        PriorityLevel::Medium => s.yellow(),
        PriorityLevel::Low => s.green(),
    }
}

/// `0.97565` → `97.57%`
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn format_metric(metric: Option<&CvssMetric>) -> String {
    match metric {
        Some(m) => match &m.vector {
            Some(vector) => format!("{:.1} ({})", m.score, vector),
            None => format!("{:.1}", m.score),
        },
        None => UNKNOWN.to_string(),
    }
}

pub fn render_decision(outcome: &DecisionOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} DSOI {}  CISA {}",
        style("▶").cyan().bold(),
        urgency_badge(outcome.urgency),
        action_badge(outcome.action),
    );
    let _ = writeln!(out, "  {} {}", style("rule").dim(), outcome.rule);
    let _ = write!(out, "  {} {}", style("rationale").dim(), outcome.rationale);
    out
}

pub fn render_analysis(record: &EvidenceRecord, assessment: &Assessment, outcome: &DecisionOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", style(record.id()).cyan().bold());
    if !record.in_primary_catalog() {
        let _ = writeln!(out, "  {}", style("No record in the severity source").yellow());
    }
    let _ = writeln!(out, "  {}", record.description().unwrap_or(UNKNOWN));

    let _ = writeln!(out, "\n{}", style("Scores").bold());
    let _ = writeln!(out, "  CVSS v3  {}", format_metric(record.severity_v3()));
    let _ = writeln!(out, "  CVSS v4  {}", format_metric(record.severity_v4()));
    let probability = record.exploit_probability();
    let _ = writeln!(
        out,
        "  EPSS     {} (percentile {})",
        format_percent(probability.and_then(|p| p.score)),
        format_percent(probability.and_then(|p| p.percentile)),
    );
    let kev = match record.known_exploited() {
        Some(k) if k.flag => format!(
            "{} (added {})",
            style("yes").red().bold(),
            k.date_added.map_or_else(|| UNKNOWN.to_string(), |d| d.to_string()),
        ),
        Some(_) => "no".to_string(),
        None => UNKNOWN.to_string(),
    };
    let _ = writeln!(out, "  KEV      {}", kev);

    let badges = assessment.signals.badges();
    if !badges.is_empty() {
        let styled: Vec<String> = badges.iter().map(|b| style(*b).red().to_string()).collect();
        let _ = writeln!(out, "  {}", styled.join(" "));
    }

    let conditions = assessment.conditions.labelled();
    if !conditions.is_empty() {
        let pills: Vec<String> = conditions.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
        let _ = writeln!(out, "\n{}", style("Exploit conditions").bold());
        let _ = writeln!(out, "  {}", pills.join("  "));
    }

    if !record.weakness_ids().is_empty() {
        let _ = writeln!(out, "\n{}", style("Weaknesses").bold());
        let _ = writeln!(out, "  {}", record.weakness_ids().join(", "));
    }
    match record.attack_patterns() {
        Some([]) => {}
        Some(patterns) => {
            let _ = writeln!(out, "\n{}", style("Attack patterns").bold());
            for p in patterns {
                let _ = writeln!(out, "  CAPEC-{:<6} {}", p.id, p.name);
            }
        }
        None => {
            let _ = writeln!(out, "\n{} {}", style("Attack patterns").bold(), style("unavailable").yellow());
        }
    }
    if !record.embedded_threats().is_empty() {
        let _ = writeln!(out, "\n{}", style("Embedded threats").bold());
        for threat in record.embedded_threats() {
            let _ = writeln!(out, "  {}", render_threat_line(threat));
        }
    }

    let _ = writeln!(
        out,
        "\n{} {} ({:.2}/10), review every {} days, next {}",
        style("Watch priority").bold(),
        priority_badge(assessment.priority.level),
        assessment.priority.score,
        assessment.review.frequency_days,
        assessment.review.next_review,
    );

    if !record.is_complete() {
        let degraded: Vec<&str> = record.degraded_sources().iter().map(|s| s.as_str()).collect();
        let _ = writeln!(out, "{} {}", style("Degraded sources:").yellow(), degraded.join(", "));
    }

    let _ = write!(out, "\n{}", render_decision(outcome));
    out
}

pub fn render_threat_line(threat: &EmbeddedThreat) -> String {
    format!(
        "{} {} {} {} [{}]",
        style("EMB3D").magenta().bold(),
        threat.weakness_id,
        style(&threat.threat_id).bold(),
        threat.threat_name,
        style(&threat.category).dim(),
    )
}

/// Every threat mapped to one weakness, with a count and EMB3D links.
pub fn render_threat_links(weakness_id: &str, links: &[ThreatLink]) -> String {
    let mut out = String::new();
    let noun = if links.len() == 1 { "threat" } else { "threats" };
    let _ = write!(out, "{} {} {}", style(weakness_id).cyan().bold(), links.len(), noun);
    for link in links {
        let _ = write!(out, "\n  {}\n    {}", render_threat_line(&link.threat), style(&link.url).dim());
    }
    out
}
