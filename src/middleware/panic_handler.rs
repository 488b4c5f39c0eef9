/// Resposta para panics capturados pelo `CatchPanicLayer`
///
/// Garante que um panic em um handler vire um 500 em JSON, no mesmo formato
/// dos demais erros, em vez de derrubar a conexão.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;

use crate::utils::INTERNAL_ERROR_MESSAGE;

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("💥 Panic while handling request: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": INTERNAL_ERROR_MESSAGE,
            "status": 500
        })),
    )
        .into_response()
}
