// Biblioteca do serviço de triagem de e-mails
// Expõe módulos para uso em testes e binários

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use ia_service::InferenceBackend;
use std::sync::Arc;

use services::{EmailProcessor, PromptCatalog, TextExtractor};

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub inference: Arc<dyn InferenceBackend>,
    pub catalog: Arc<PromptCatalog>,
    pub processor: EmailProcessor,
    pub extractor: TextExtractor,
}

impl AppState {
    pub fn new(
        settings: config::Settings,
        inference: Arc<dyn InferenceBackend>,
        catalog: Arc<PromptCatalog>,
    ) -> Self {
        let processor = EmailProcessor::new(inference.clone(), catalog.clone());
        let extractor = TextExtractor::new(&settings.upload.dir);

        Self {
            settings,
            inference,
            catalog,
            processor,
            extractor,
        }
    }
}
