use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub inference: InferenceSettings,
    pub prompts: PromptSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InferenceSettings {
    pub base_url: String,  // Aceita também a URL completa terminada em /api/generate
    pub model: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromptSettings {
    pub dir: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadSettings {
    pub dir: String,
    pub max_bytes: usize,
}

impl InferenceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Valores padrão (funciona sem nenhum arquivo de configuração)
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("inference.base_url", ia_service::DEFAULT_BASE_URL)?
            .set_default("inference.model", ia_service::DEFAULT_MODEL)?
            .set_default("inference.timeout_seconds", ia_service::DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("prompts.dir", "prompts")?
            .set_default("upload.dir", "uploads")?
            .set_default("upload.max_bytes", 10_i64 * 1024 * 1024)?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("EMAIL_TRIAGE").separator("__"));

        // Variáveis herdadas da implantação original
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            builder = builder.set_override("inference.base_url", url)?;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            builder = builder.set_override("inference.model", model)?;
        }
        if let Ok(dir) = std::env::var("PROMPTS_DIR") {
            builder = builder.set_override("prompts.dir", dir)?;
        }

        let s = builder.build()?;

        s.try_deserialize()
    }
}
