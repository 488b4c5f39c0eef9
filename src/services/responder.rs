//! Redação da resposta automática
//!
//! Junta o texto gerado pela IA (limpo), a mensagem padrão da categoria e,
//! quando o cliente pede suporte, a mensagem de suporte.

use ia_service::{GenerateOptions, InferenceBackend};
use std::sync::Arc;

use super::prompt_catalog::PromptCatalog;
use super::support_detector::SupportDetector;
use super::text_cleaner::clean_response;
use crate::models::{Category, ComposedReply};
use crate::utils::logging::*;

/// Texto livre: temperatura moderada e até 200 tokens
pub const RESPONSE_OPTIONS: GenerateOptions = GenerateOptions {
    temperature: 0.5,
    num_predict: 200,
};

#[derive(Clone)]
pub struct EmailResponder {
    backend: Arc<dyn InferenceBackend>,
    catalog: Arc<PromptCatalog>,
    support_detector: SupportDetector,
}

impl EmailResponder {
    pub fn new(backend: Arc<dyn InferenceBackend>, catalog: Arc<PromptCatalog>) -> Self {
        let support_detector = SupportDetector::new(&catalog.support_keywords);
        Self {
            backend,
            catalog,
            support_detector,
        }
    }

    pub fn build_prompt(&self, text: &str) -> String {
        format!(
            "{}\nE-mail do cliente:\n{}\nResposta:",
            self.catalog.initial_instructions(),
            text
        )
    }

    pub async fn compose(&self, text: &str, category: Category) -> ComposedReply {
        let prompt = self.build_prompt(text);

        let (resposta_ia, diagnostico) = match self.backend.generate(&prompt, RESPONSE_OPTIONS).await {
            Ok(raw) => {
                let cleaned = clean_response(&raw);
                if cleaned.is_empty() {
                    log_warning("Generated reply was empty after cleanup; using fallback message");
                    (
                        self.catalog.error_ia_message().to_string(),
                        Some("Erro: resposta da IA vazia após a limpeza".to_string()),
                    )
                } else {
                    (cleaned, None)
                }
            }
            Err(e) => {
                log_inference_error("reply generation", &e.to_string());
                (
                    self.catalog.error_ia_message().to_string(),
                    Some(format!("Erro: falha na chamada à IA ({})", e.kind())),
                )
            }
        };

        let suporte_solicitado = self.support_detector.requested(text);
        let mensagem_suporte = if suporte_solicitado {
            self.catalog.support_message().map(str::to_string)
        } else {
            None
        };

        ComposedReply {
            resposta_ia,
            mensagem_padrao: self.catalog.default_message(category).to_string(),
            suporte_solicitado,
            mensagem_suporte,
            diagnostico,
        }
    }
}
