use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::Json,
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::models::{ReplyResult, UploadedFile};
use crate::services::TextExtractor;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

const ENDPOINT: &str = "/process";
const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Conteúdo enviado excede o tamanho máximo permitido.";

/// Corpo JSON ou formulário com o campo `text`
#[derive(Debug, Default, Deserialize)]
struct TextPayload {
    #[serde(default)]
    text: Option<String>,
}

/// Recebe um arquivo (PDF/TXT) ou texto, classifica e gera a resposta automática
pub async fn process_email(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ReplyResult>, AppError> {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4();
    log_request_received(ENDPOINT, "POST");

    let outcome = handle_submission(&state, request)
        .instrument(tracing::info_span!("process_email", %request_id))
        .await;

    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    log_request_processed(ENDPOINT, status.as_u16(), start_time.elapsed().as_millis() as u64);

    outcome.map(Json)
}

async fn handle_submission(state: &Arc<AppState>, request: Request) -> AppResult<ReplyResult> {
    let (file, text) = read_submission(state, request).await?;
    let source = TextExtractor::resolve_source(file, text)?;

    // Leitura de PDF e disco fora do runtime assíncrono
    let extractor = state.extractor.clone();
    let input = tokio::task::spawn_blocking(move || extractor.extract(source))
        .await
        .map_err(|e| AppError::InternalError(format!("Extraction task failed: {}", e)))??;

    Ok(state.processor.process(&input).await)
}

/// Lê `file`/`text` de multipart, JSON ou formulário urlencoded
async fn read_submission(
    state: &Arc<AppState>,
    request: Request,
) -> AppResult<(Option<UploadedFile>, Option<String>)> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| body_error("Formulário inválido", e.status(), e.body_text()))?;
        return read_multipart(multipart).await;
    }

    let payload = if content_type.starts_with("application/json") {
        let Json(payload) = Json::<TextPayload>::from_request(request, state)
            .await
            .map_err(|e| body_error("JSON inválido", e.status(), e.body_text()))?;
        payload
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(payload) = Form::<TextPayload>::from_request(request, state)
            .await
            .map_err(|e| body_error("Formulário inválido", e.status(), e.body_text()))?;
        payload
    } else {
        TextPayload::default()
    };

    Ok((None, payload.text))
}

async fn read_multipart(mut multipart: Multipart) -> AppResult<(Option<UploadedFile>, Option<String>)> {
    let mut file = None;
    let mut text = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("text") => {
                text = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok((file, text))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    body_error("Formulário inválido", err.status(), err.body_text())
}

/// Rejeição do corpo: 413 quando passa do limite configurado, senão 400
fn body_error(context: &str, status: StatusCode, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        log_validation_error("body", "request exceeds the configured size limit");
        AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
    } else {
        AppError::ValidationError(format!("{}: {}", context, detail))
    }
}
