use axum::{
    extract::{Path, Query, State},
    Json,
};
use crate::api::models::{EvidenceQuery, EvidenceResponse};
use crate::api::AppState;
use crate::assessment::{suggest_input, Assessment, TrackingStatus};
use crate::decision::{Exploitation, Exposure, TechnicalImpact};
use crate::errors::TriageError;

pub async fn get_evidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EvidenceQuery>,
) -> Result<Json<EvidenceResponse>, TriageError> {
    let evidence = state.aggregator.analyze(&id).await?;

    let status = TrackingStatus::from_raw(query.status.as_deref());
    let assessment = Assessment::of(&evidence, status, chrono::Utc::now().date_naive());
    let mut suggested_input = suggest_input(
        &evidence,
        query.exposure.as_deref().and_then(Exposure::parse),
        query.impact.as_deref().and_then(TechnicalImpact::parse),
    );
    if let Some(exploitation) = query.exploitation.as_deref().and_then(Exploitation::parse) {
        suggested_input.exploitation = exploitation;
    }
    let decision = state.engine.decide(suggested_input);

    Ok(Json(EvidenceResponse { evidence, assessment, suggested_input, decision }))
}
