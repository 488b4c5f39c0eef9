// Handlers HTTP e montagem do router
pub mod health;
pub mod process;

pub use health::*;
pub use process::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::handle_panic;
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.settings.upload.max_bytes;

    Router::new()
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))

        // Triagem
        .route("/process", post(process_email))

        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Settings;
    use crate::services::test_support::ScriptedBackend;
    use crate::services::PromptCatalog;

    fn app(backend: Arc<ScriptedBackend>) -> Router {
        let settings = Settings::new().unwrap();
        router(Arc::new(AppState::new(
            settings,
            backend,
            Arc::new(PromptCatalog::default()),
        )))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_process_requires_post() {
        let response = app(Arc::new(ScriptedBackend::default()))
            .oneshot(Request::get("/process").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_content_type_counts_as_no_input() {
        let backend = Arc::new(ScriptedBackend::default());
        let response = app(backend.clone())
            .oneshot(
                Request::post("/process")
                    .header(CONTENT_TYPE, "text/plain")
                    .body(Body::from("Qual o status do meu pedido?"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Nenhum texto ou arquivo válido enviado");
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_validation_error() {
        let response = app(Arc::new(ScriptedBackend::default()))
            .oneshot(
                Request::post("/process")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"text\": "))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("JSON inválido"));
    }

    #[tokio::test]
    async fn test_json_text_runs_pipeline() {
        let backend = Arc::new(ScriptedBackend::with_replies([
            Ok("produtivo".to_string()),
            Ok("Estamos verificando seu pedido.".to_string()),
        ]));
        let response = app(backend.clone())
            .oneshot(
                Request::post("/process")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text": "Qual o status do meu pedido?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["categoria"], "produtivo");
        assert_eq!(body["detalhes"]["resposta_ia"], "Estamos verificando seu pedido.");
        assert_eq!(backend.call_count(), 2);
    }
}
