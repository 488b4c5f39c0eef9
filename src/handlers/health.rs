use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn ready_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    log_health_check();

    // Testa a conexão com o servidor de inferência
    let (inference_status, inference_error) = match state.inference.health_check().await {
        Ok(_) => ("connected", None),
        Err(e) => {
            log_warning(&format!("Inference server not ready: {}", e));
            ("disconnected", Some(e.to_string()))
        }
    };

    let overall_ready = inference_status == "connected";

    let response = json!({
        "ready": overall_ready,
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "inference": {
                "status": inference_status,
                "model": state.inference.model_name(),
                "base_url": state.settings.inference.base_url,
                "error": inference_error
            },
            "prompts": {
                "dir": state.settings.prompts.dir,
                "analyzer_loaded": !state.catalog.analyzer.is_empty(),
                "support_keywords": state.catalog.support_keywords.len()
            }
        }
    });

    if overall_ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
