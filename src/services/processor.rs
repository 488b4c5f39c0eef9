use ia_service::InferenceBackend;
use std::sync::Arc;

use super::classifier::EmailClassifier;
use super::prompt_catalog::PromptCatalog;
use super::responder::EmailResponder;
use crate::models::{EmailInput, ReplyResult};
use crate::utils::AppResult;

/// Pipeline completo: classificação seguida da redação da resposta
#[derive(Clone)]
pub struct EmailProcessor {
    classifier: EmailClassifier,
    responder: EmailResponder,
}

impl EmailProcessor {
    pub fn new(backend: Arc<dyn InferenceBackend>, catalog: Arc<PromptCatalog>) -> Self {
        Self {
            classifier: EmailClassifier::new(backend.clone(), catalog.clone()),
            responder: EmailResponder::new(backend, catalog),
        }
    }

    pub async fn process(&self, input: &EmailInput) -> ReplyResult {
        let categoria = self.classifier.classify(input.as_str()).await;
        let detalhes = self.responder.compose(input.as_str(), categoria).await;
        ReplyResult::new(input, categoria, detalhes)
    }

    /// Valida o texto e executa o pipeline
    pub async fn process_text(&self, text: impl Into<String>) -> AppResult<ReplyResult> {
        let input = EmailInput::new(text)?;
        Ok(self.process(&input).await)
    }
}
