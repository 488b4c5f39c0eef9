//! Classificação do e-mail em produtivo/improdutivo usando o LLM
//!
//! A saída do modelo é normalizada e, na dúvida, o e-mail é tratado como
//! improdutivo. O mesmo vale quando a chamada de inferência falha.

use ia_service::{GenerateOptions, InferenceBackend};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use super::prompt_catalog::PromptCatalog;
use crate::models::Category;
use crate::utils::logging::*;

/// Classificação pede uma única palavra: temperatura zero e poucos tokens
pub const CLASSIFY_OPTIONS: GenerateOptions = GenerateOptions {
    temperature: 0.0,
    num_predict: 10,
};

static LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(produtivo|improdutivo)\b").expect("valid label regex"));

/// Converte a saída do modelo em categoria
pub fn parse_category(raw: &str) -> Category {
    let normalized = raw.trim().to_lowercase();

    if let Some(category) = Category::from_label(&normalized) {
        return category;
    }

    LABEL_RE
        .captures(&normalized)
        .and_then(|caps| Category::from_label(&caps[1]))
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct EmailClassifier {
    backend: Arc<dyn InferenceBackend>,
    catalog: Arc<PromptCatalog>,
}

impl EmailClassifier {
    pub fn new(backend: Arc<dyn InferenceBackend>, catalog: Arc<PromptCatalog>) -> Self {
        Self { backend, catalog }
    }

    pub async fn classify(&self, text: &str) -> Category {
        if text.trim().is_empty() {
            log_warning("Empty text sent for classification");
            return Category::Improdutivo;
        }

        let prompt = self.catalog.render_analyzer(text);

        let raw = match self.backend.generate(&prompt, CLASSIFY_OPTIONS).await {
            Ok(raw) => raw,
            Err(e) => {
                log_inference_error("classification", &e.to_string());
                return Category::Improdutivo;
            }
        };

        let category = parse_category(&raw);
        log_classification(category.as_str(), &raw);
        category
    }
}
