//! Serviço de IA para o servidor LLM local
//!
//! Este crate fornece o cliente de inferência usado pela triagem de e-mails:
//! - Geração de texto via `POST /api/generate` (API compatível com Ollama)
//! - Verificação de disponibilidade via `GET /api/tags`
//!
//! O cliente concreto (`OllamaClient`) fica atrás do trait `InferenceBackend`,
//! de modo que classificador e redator possam ser testados com um stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Modelo padrão quando `OLLAMA_MODEL` não está definido
pub const DEFAULT_MODEL: &str = "mistral:instruct";

/// Endereço padrão do servidor de inferência
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Timeout padrão de cada chamada de geração
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const GENERATE_PATH: &str = "/api/generate";
const TAGS_PATH: &str = "/api/tags";

/// Erros do serviço de IA
#[derive(Debug, Error)]
pub enum IaServiceError {
    /// A chamada excedeu o timeout configurado
    #[error("Inference timeout after {0}s")]
    Timeout(u64),

    /// Servidor de inferência inacessível
    #[error("Inference server unreachable: {0}")]
    Connection(String),

    /// Resposta com status diferente de 2xx
    #[error("Inference server error (status {status}): {body}")]
    Status { status: u16, body: String },

    /// Demais falhas de transporte HTTP
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Corpo de resposta inválido
    #[error("Invalid inference response: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl IaServiceError {
    /// Categoria curta da falha, sem URL nem corpo da resposta
    pub fn kind(&self) -> &'static str {
        match self {
            IaServiceError::Timeout(_) => "timeout",
            IaServiceError::Connection(_) => "servidor indisponível",
            IaServiceError::Status { .. } => "status HTTP inesperado",
            IaServiceError::Http(_) => "falha de transporte",
            IaServiceError::Parse(_) => "resposta inválida",
            IaServiceError::Config(_) => "configuração inválida",
        }
    }
}

pub type IaResult<T> = Result<T, IaServiceError>;

/// Opções de amostragem enviadas em `options`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    /// Limite de tokens gerados (`num_predict` na API)
    pub num_predict: u32,
}

impl GenerateOptions {
    pub fn new(temperature: f32, num_predict: u32) -> Self {
        Self {
            temperature,
            num_predict,
        }
    }
}

/// Contrato mínimo de um backend de inferência: prompt entra, texto sai.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Gera texto para o prompt. Retorna o campo `response` já sem espaços nas bordas.
    async fn generate(&self, prompt: &str, options: GenerateOptions) -> IaResult<String>;

    /// Verifica se o servidor responde
    async fn health_check(&self) -> IaResult<()>;

    fn model_name(&self) -> &str;
}

/// Configuração do cliente de inferência
#[derive(Debug, Clone)]
pub struct IaServiceConfig {
    /// URL base do servidor (sem `/api/generate`)
    pub base_url: String,
    /// Nome do modelo (padrão: mistral:instruct)
    pub model: String,
    /// Timeout total por chamada (padrão: 60s)
    pub timeout: Duration,
    /// Timeout de conexão (padrão: 5s)
    pub connect_timeout: Duration,
}

impl IaServiceConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn generate_url(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    pub fn tags_url(&self) -> String {
        format!("{}{}", self.base_url, TAGS_PATH)
    }
}

impl Default for IaServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Aceita tanto `http://host:11434` quanto `http://host:11434/api/generate`
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(GENERATE_PATH)
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Cliente HTTP do servidor de inferência
#[derive(Clone)]
pub struct OllamaClient {
    http_client: reqwest::Client,
    config: IaServiceConfig,
}

impl OllamaClient {
    pub fn new(config: IaServiceConfig) -> IaResult<Self> {
        if config.model.trim().is_empty() {
            return Err(IaServiceError::Config("model name is empty".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| IaServiceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "✅ OllamaClient inicializado: {} (modelo: {})",
            config.base_url,
            config.model
        );

        Ok(Self {
            http_client,
            config,
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> IaServiceError {
        if err.is_timeout() {
            IaServiceError::Timeout(self.config.timeout.as_secs())
        } else if err.is_connect() {
            IaServiceError::Connection(err.to_string())
        } else {
            IaServiceError::Http(err)
        }
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn generate(&self, prompt: &str, options: GenerateOptions) -> IaResult<String> {
        tracing::debug!(
            "🔍 Enviando prompt ({} chars) para {} [temperature={}, num_predict={}]",
            prompt.chars().count(),
            self.config.model,
            options.temperature,
            options.num_predict
        );

        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options,
        };

        let response = self
            .http_client
            .post(self.config.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let body: String = error_text.chars().take(200).collect();
            tracing::error!("❌ Servidor de inferência retornou {}: {}", status, body);
            return Err(IaServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|e| IaServiceError::Parse(e.to_string()))?;

        Ok(parsed.response.trim().to_string())
    }

    async fn health_check(&self) -> IaResult<()> {
        let response = self
            .http_client
            .get(self.config.tags_url())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(IaServiceError::Status {
                status: response.status().as_u16(),
                body: String::new(),
            })
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> OllamaClient {
        OllamaClient::new(IaServiceConfig::new(server.base_url()).with_model("modelo-teste")).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = IaServiceConfig::new("http://ia:11434/")
            .with_model("llama3")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://ia:11434");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.generate_url(), "http://ia:11434/api/generate");
    }

    #[test]
    fn test_normalize_accepts_full_generate_url() {
        assert_eq!(
            normalize_base_url("http://localhost:11434/api/generate"),
            "http://localhost:11434"
        );
        assert_eq!(normalize_base_url(" http://x:1/ "), "http://x:1");
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let result = OllamaClient::new(IaServiceConfig::default().with_model("  "));
        assert!(matches!(result, Err(IaServiceError::Config(_))));
    }

    #[tokio::test]
    async fn test_generate_sends_expected_body_and_trims_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate").json_body(json!({
                    "model": "modelo-teste",
                    "prompt": "Classifique: oi",
                    "stream": false,
                    "options": { "temperature": 0.5, "num_predict": 200 }
                }));
                then.status(200)
                    .json_body(json!({ "response": "  Produtivo \n", "done": true }));
            })
            .await;

        let client = client_for(&server);
        let text = client
            .generate("Classifique: oi", GenerateOptions::new(0.5, 200))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Produtivo");
    }

    #[tokio::test]
    async fn test_missing_response_field_yields_empty_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({ "done": true }));
            })
            .await;

        let text = client_for(&server)
            .generate("x", GenerateOptions::new(0.0, 10))
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500).body("model not loaded");
            })
            .await;

        let err = client_for(&server)
            .generate("x", GenerateOptions::new(0.0, 10))
            .await
            .unwrap_err();

        match err {
            IaServiceError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("model not loaded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).body("not json");
            })
            .await;

        let err = client_for(&server)
            .generate("x", GenerateOptions::new(0.0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, IaServiceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200)
                    .delay(Duration::from_millis(1500))
                    .json_body(json!({ "response": "produtivo" }));
            })
            .await;

        let client = OllamaClient::new(
            IaServiceConfig::new(server.base_url()).with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = client
            .generate("x", GenerateOptions::new(0.0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, IaServiceError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = OllamaClient::new(IaServiceConfig::new(format!("http://127.0.0.1:{port}"))).unwrap();
        let err = client
            .generate("x", GenerateOptions::new(0.0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, IaServiceError::Connection(_)));
    }

    #[tokio::test]
    async fn test_health_check_uses_tags_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(200).json_body(json!({ "models": [] }));
            })
            .await;

        client_for(&server).health_check().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_health_check_fails_on_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(503);
            })
            .await;

        let err = client_for(&server).health_check().await.unwrap_err();
        assert!(matches!(err, IaServiceError::Status { status: 503, .. }));
        assert_eq!(err.kind(), "status HTTP inesperado");
    }

    #[test]
    fn test_error_kind_hides_details() {
        let err = IaServiceError::Connection("tcp connect error: http://10.0.0.7:11434".to_string());
        assert_eq!(err.kind(), "servidor indisponível");
        assert_eq!(IaServiceError::Timeout(60).kind(), "timeout");
    }
}
