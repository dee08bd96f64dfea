use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use crate::api::models::{ErrorResponse, ThreatResponse};
use crate::api::AppState;
use crate::normalize::normalize_weakness_id;

pub async fn get_threat(
    State(state): State<AppState>,
    Path(cwe): Path<String>,
) -> Result<Json<ThreatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(weakness_id) = normalize_weakness_id(&cwe) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: format!("'{}' is not a weakness id", cwe) }),
        ));
    };

    let table = state.aggregator.mapper().embedded_table();
    let threats = table.links(&weakness_id);
    if threats.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse { error: format!("No embedded threat mapping for {}", weakness_id) }),
        ));
    }

    Ok(Json(ThreatResponse {
        weakness_id,
        table_version: table.version().to_string(),
        count: threats.len(),
        threats,
    }))
}
