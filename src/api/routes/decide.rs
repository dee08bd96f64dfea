use axum::{extract::State, Json};
use crate::api::AppState;
use crate::decision::{DecisionInput, DecisionOutcome};

/// Unrecognized or missing fields take their defaults, so any JSON object
/// yields a decision.
pub async fn post_decide(
    State(state): State<AppState>,
    Json(input): Json<DecisionInput>,
) -> Json<DecisionOutcome> {
    Json(state.engine.decide(input))
}
