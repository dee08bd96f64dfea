use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "sources": {
                "type": "object",
                "properties": {
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "user_agent": { "type": "string" },
                    "nvd": { "$ref": "#/$defs/endpoint" },
                    "epss": { "$ref": "#/$defs/endpoint" },
                    "kev": { "$ref": "#/$defs/endpoint" },
                    "cwe_catalog": { "$ref": "#/$defs/endpoint" },
                    "capec_catalog": { "$ref": "#/$defs/endpoint" }
                }
            },
            "policy": {
                "type": "object",
                "properties": {
                    "description_languages": { "type": "array", "items": { "type": "string" }, "minItems": 1 },
                    "kev_match": { "type": "string", "enum": ["first", "latest"] }
                }
            },
            "cache": {
                "type": "object",
                "properties": {
                    "backend": { "type": "string", "enum": ["memory", "session"] },
                    "directory": { "type": "string" }
                }
            },
            "retry": {
                "type": "object",
                "properties": {
                    "max_retries": { "type": "integer", "minimum": 0 },
                    "backoff_cap_secs": { "type": "integer", "minimum": 0 }
                }
            },
            "embedded_threats_file": { "type": "string" }
        },
        "$defs": {
            "endpoint": {
                "type": "object",
                "required": ["url"],
                "properties": {
                    "url": { "type": "string", "format": "uri" },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "api_key": { "type": "string" }
                }
            }
        }
    })
});
