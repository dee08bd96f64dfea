use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use crate::assessment::{suggest_input, Assessment, TrackingStatus};
use crate::cli::commands::AnalyzeArgs;
use crate::cli::render;
use crate::config::TriageConfig;
use crate::decision::{DecisionEngine, DecisionInput, DecisionOutcome, Exploitation, Exposure, TechnicalImpact};
use crate::errors::TriageError;
use crate::models::{EvidenceRecord, VulnId};
use crate::pipeline::EvidenceAggregator;

#[derive(Serialize)]
struct AnalysisReport<'a> {
    evidence: &'a EvidenceRecord,
    assessment: &'a Assessment,
    decision_input: DecisionInput,
    decision: &'a DecisionOutcome,
}

pub async fn handle_analyze(args: AnalyzeArgs, config: TriageConfig, quiet: bool) -> Result<(), TriageError> {
    // Reject bad input before building any client
    let id = VulnId::parse(&args.id)?;
    let aggregator = EvidenceAggregator::from_config(&config)?;

    let spinner = (!quiet && !args.json).then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Collecting evidence for {}", id));
        bar.enable_steady_tick(Duration::from_millis(120));
        bar
    });

    let result = aggregator.aggregate(&id).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let record = result?;

    let mut input = suggest_input(
        &record,
        args.exposure.as_deref().and_then(Exposure::parse),
        args.impact.as_deref().and_then(TechnicalImpact::parse),
    );
    if let Some(exploitation) = args.exploitation.as_deref().and_then(Exploitation::parse) {
        input.exploitation = exploitation;
    }
    let outcome = DecisionEngine::default().decide(input);

    let status = TrackingStatus::from_raw(args.status.as_deref());
    let assessment = Assessment::of(&record, status, chrono::Utc::now().date_naive());

    if args.json {
        let report = AnalysisReport {
            evidence: &record,
            assessment: &assessment,
            decision_input: input,
            decision: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render::render_analysis(&record, &assessment, &outcome));
    }
    Ok(())
}
