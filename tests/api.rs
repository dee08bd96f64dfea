use axum::http::StatusCode;
use axum::body::Body;
use http_body_util::BodyExt;
use tower::ServiceExt;
use serde_json::{json, Value};
use std::sync::Arc;
use async_trait::async_trait;
use cvetriage::api::{build_router, AppState};
use cvetriage::cache::MemoryCache;
use cvetriage::config::PolicyConfig;
use cvetriage::decision::DecisionEngine;
use cvetriage::errors::{FetchError, RetryConfig};
use cvetriage::mapping::{EmbeddedThreatTable, ThreatMapper};
use cvetriage::pipeline::EvidenceAggregator;
use cvetriage::sources::{SourceClient, SourceKind, Sources};

struct FixedSource {
    kind: SourceKind,
    response: Result<Value, FetchError>,
}

#[async_trait]
impl SourceClient for FixedSource {
    async fn fetch(&self, _query: Option<&str>) -> Result<Value, FetchError> {
        self.response.clone()
    }

    fn kind(&self) -> SourceKind {
        self.kind
    }
}

fn source(kind: SourceKind, response: Result<Value, FetchError>) -> Arc<dyn SourceClient> {
    Arc::new(FixedSource { kind, response })
}

fn create_test_state(severity: Result<Value, FetchError>) -> AppState {
    create_state_with_mapper(severity, ThreatMapper::default())
}

fn create_state_with_mapper(severity: Result<Value, FetchError>, mapper: ThreatMapper) -> AppState {
    let sources = Sources {
        severity: source(SourceKind::Severity, severity),
        exploit_probability: source(
            SourceKind::ExploitProbability,
            Ok(json!({ "data": [{ "epss": "0.94", "percentile": "0.99" }] })),
        ),
        known_exploited: source(
            SourceKind::KnownExploited,
            Ok(json!({ "vulnerabilities": [{ "cveID": "CVE-2024-3400", "dateAdded": "2024-04-12" }] })),
        ),
        weakness_catalog: source(SourceKind::WeaknessCatalog, Ok(json!({ "77": { "RelatedAttackPatterns": ["136"] } }))),
        attack_pattern_catalog: source(SourceKind::AttackPatternCatalog, Ok(json!({ "136": { "name": "LDAP Injection" } }))),
    };
    let aggregator = EvidenceAggregator::new(
        sources,
        Arc::new(MemoryCache::new()),
        mapper,
        PolicyConfig::default(),
        RetryConfig::disabled(),
    );
    AppState::new(aggregator, DecisionEngine::default())
}

fn panos_payload() -> Value {
    json!({ "vulnerabilities": [{ "cve": {
        "id": "CVE-2024-3400",
        "descriptions": [{ "lang": "en", "value": "A command injection in the GlobalProtect feature of PAN-OS." }],
        "metrics": {
            "cvssMetricV31": [{ "cvssData": { "baseScore": 10.0, "attackVector": "NETWORK", "scope": "CHANGED" } }],
            "cvssMetricV40": [{ "cvssData": { "baseScore": 10.0, "attackVector": "NETWORK", "attackRequirements": "NONE" } }]
        },
        "weaknesses": [{ "description": [{ "lang": "en", "value": "CWE-77" }, { "lang": "en", "value": "CWE-20" }] }],
        "references": [{ "url": "https://security.paloaltonetworks.com/CVE-2024-3400" }]
    }}]})
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state(Ok(panos_payload()));
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "cvetriage");
}

#[tokio::test]
async fn test_evidence_endpoint() {
    let state = create_test_state(Ok(panos_payload()));
    let req = make_request("GET", "/api/evidence/cve-2024-3400?exposure=controlled&impact=total", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let evidence = &body["evidence"];
    assert_eq!(evidence["id"], "CVE-2024-3400");
    assert_eq!(evidence["weakness_ids"], json!(["CWE-77", "CWE-20"]));
    assert_eq!(evidence["attack_patterns"][0]["name"], "LDAP Injection");
    assert_eq!(evidence["embedded_threats"][0]["threat_id"], "T1.2");
    assert_eq!(evidence["known_exploited"]["flag"], true);
    assert_eq!(evidence["known_exploited"]["date_added"], "2024-04-12");

    assert_eq!(body["assessment"]["signals"]["remote"], true);
    assert_eq!(body["assessment"]["priority"]["level"], "CRITICAL");
    assert_eq!(body["suggested_input"], json!({ "exploitation": "A", "exposure": "C", "technical_impact": "T" }));
    assert_eq!(body["decision"]["urgency"], "Out-of-Cycle");
    assert_eq!(body["decision"]["action"], "Act");
}

#[tokio::test]
async fn test_evidence_malformed_id_is_400() {
    let state = create_test_state(Ok(panos_payload()));
    let req = make_request("GET", "/api/evidence/not-a-cve", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Malformed identifier"));
}

#[tokio::test]
async fn test_evidence_primary_unreachable_is_502() {
    let state = create_test_state(Err(FetchError::HttpStatus { origin: SourceKind::Severity, code: 503 }));
    let req = make_request("GET", "/api/evidence/CVE-2024-3400", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("HTTP 503"));
}

#[tokio::test]
async fn test_decide_endpoint() {
    let state = create_test_state(Ok(panos_payload()));
    let req = make_request("POST", "/api/decide", Some(json!({
        "exploitation": "P",
        "exposure": "O",
        "technical_impact": "T"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["urgency"], "Out-of-Cycle");
    assert_eq!(body["action"], "Attend");
    assert_eq!(body["rule"], "poc-open-total");
    assert!(body["rationale"].as_str().unwrap().starts_with("Exploitation=P"));
}

#[tokio::test]
async fn test_decide_endpoint_defaults_empty_body_fields() {
    let state = create_test_state(Ok(panos_payload()));
    let req = make_request("POST", "/api/decide", Some(json!({})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["input"], json!({ "exploitation": "N", "exposure": "O", "technical_impact": "P" }));
    assert_eq!(body["urgency"], "Defer");
    assert_eq!(body["action"], "Track");
}

#[tokio::test]
async fn test_threats_endpoint() {
    let state = create_test_state(Ok(panos_payload()));

    let req = make_request("GET", "/api/threats/787", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["weakness_id"], "CWE-787");
    assert_eq!(body["count"], 1);
    assert_eq!(body["threats"][0]["threat_name"], "Memory Corruption");
    assert_eq!(body["threats"][0]["url"], "https://emb3d.mitre.org/threats/T1.1");

    let req = make_request("GET", "/api/threats/CWE-79", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let req = make_request("GET", "/api/threats/NVD-CWE-noinfo", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_threats_endpoint_lists_every_mapping() {
    let table = EmbeddedThreatTable::from_yaml_str(
        "version: site-1\nmappings:\n  CWE-119:\n    - {threat_id: T1.1, threat_name: Memory Corruption, category: Application Software}\n    - {threat_id: T1.3, threat_name: Buffer Over-read, category: Application Software}\n",
    )
    .unwrap();
    let state = create_state_with_mapper(Ok(panos_payload()), ThreatMapper::new(table));

    let req = make_request("GET", "/api/threats/CWE-119", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["table_version"], "site-1");
    assert_eq!(body["count"], 2);
    assert_eq!(body["threats"][0]["threat_id"], "T1.1");
    assert_eq!(body["threats"][1]["threat_id"], "T1.3");
    assert_eq!(body["threats"][1]["url"], "https://emb3d.mitre.org/threats/T1.3");
}

#[tokio::test]
async fn test_decide_endpoint_defaults_non_string_values() {
    let state = create_test_state(Ok(panos_payload()));
    let req = make_request("POST", "/api/decide", Some(json!({ "exploitation": "A", "exposure": 3 })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["input"]["exposure"], "O");
    assert_eq!(body["urgency"], "Immediate");
    assert_eq!(body["action"], "Act");
}

#[tokio::test]
async fn test_evidence_endpoint_exploitation_override() {
    let state = create_test_state(Ok(panos_payload()));
    let req = make_request("GET", "/api/evidence/CVE-2024-3400?exploitation=poc&exposure=open&impact=partial", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["suggested_input"], json!({ "exploitation": "P", "exposure": "O", "technical_impact": "P" }));
    assert_eq!(body["decision"]["urgency"], "Scheduled");
    assert_eq!(body["decision"]["action"], "Attend");
}
