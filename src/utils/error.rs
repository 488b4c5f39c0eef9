use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ia_service::IaServiceError;
use serde_json::json;
use std::fmt;

/// Mensagem genérica exibida ao cliente em falhas internas
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor. Tente novamente mais tarde.";

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    PayloadTooLarge(String),
    InferenceError(IaServiceError),
    ConfigError(String),
    IoError(std::io::Error),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::InferenceError(err) => write!(f, "Inference error: {}", err),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::IoError(err) => write!(f, "IO error: {}", err),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<IaServiceError> for AppError {
    fn from(err: IaServiceError) -> Self {
        AppError::InferenceError(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InferenceError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_)
            | AppError::IoError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Só erros do cliente chegam com a mensagem original
        let error_message = match self {
            AppError::ValidationError(msg) | AppError::PayloadTooLarge(msg) => msg,
            AppError::InferenceError(err) => {
                tracing::error!("Inference failure reached the boundary: {}", err);
                "Serviço de IA indisponível no momento.".to_string()
            }
            other => {
                tracing::error!("Unhandled error: {}", other);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_message() {
        let response = AppError::ValidationError("Nenhum texto".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(
            AppError::from(io).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InternalError("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_inference_error_maps_to_bad_gateway() {
        let err: AppError = IaServiceError::Timeout(60).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err = AppError::PayloadTooLarge("Arquivo muito grande".to_string());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_display() {
        let err = AppError::ValidationError("campo vazio".to_string());
        assert_eq!(err.to_string(), "Validation error: campo vazio");
    }
}
