//! Catálogo de prompts e mensagens padrão
//!
//! Carregado uma única vez no startup a partir do diretório de prompts e
//! compartilhado (somente leitura) entre classificador e redator.
//! Arquivo ausente resulta em valor vazio; os acessores aplicam os textos
//! padrão embutidos, exceto a mensagem de suporte, que é simplesmente omitida.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::models::Category;
use crate::utils::logging::*;

/// Marcador substituído pelo corpo do e-mail no prompt de análise
pub const TEXT_PLACEHOLDER: &str = "{text}";

pub const ANALYZER_FILE: &str = "prompt_analyzer.txt";
pub const INITIAL_RESPONSE_FILE: &str = "prompt_resposta_inicial.txt";
pub const PRODUCTIVE_FILE: &str = "msg_produtivo.txt";
pub const UNPRODUCTIVE_FILE: &str = "msg_improdutivo.txt";
pub const ERROR_IA_FILE: &str = "msg_erro_ia.txt";
pub const SUPPORT_FILE: &str = "msg_suporte.txt";
pub const SUPPORT_KEYWORDS_FILE: &str = "palavras_suporte.txt";

pub const DEFAULT_ANALYZER_PROMPT: &str =
    "Classifique o seguinte texto como produtivo ou improdutivo: {text}";
pub const DEFAULT_INITIAL_PROMPT: &str = "Você é um assistente de atendimento de uma empresa do setor financeiro. \
Escreva somente o texto da resposta ao cliente, em linguagem natural, sem explicações, marcações ou assinatura.";
pub const DEFAULT_PRODUCTIVE_MESSAGE: &str =
    "Sua solicitação foi registrada e será analisada pela nossa equipe.";
pub const DEFAULT_UNPRODUCTIVE_MESSAGE: &str =
    "Agradecemos o contato! Sua mensagem foi recebida.";
pub const DEFAULT_ERROR_IA_MESSAGE: &str =
    "Não foi possível gerar uma resposta automática no momento.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptCatalog {
    pub analyzer: String,
    pub initial_response: String,
    pub productive: String,
    pub unproductive: String,
    pub error_ia: String,
    pub support: String,
    /// Palavras-chave em minúsculas
    pub support_keywords: Vec<String>,
}

impl PromptCatalog {
    /// Carrega todos os arquivos do diretório. Nunca falha: ausências viram texto vazio.
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let mut missing = Vec::new();

        let mut read = |name: &'static str| -> String {
            match read_prompt_file(dir, name) {
                Some(content) => content,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let catalog = Self {
            analyzer: read(ANALYZER_FILE),
            initial_response: read(INITIAL_RESPONSE_FILE),
            productive: read(PRODUCTIVE_FILE),
            unproductive: read(UNPRODUCTIVE_FILE),
            error_ia: read(ERROR_IA_FILE),
            support: read(SUPPORT_FILE),
            support_keywords: parse_keywords(&read(SUPPORT_KEYWORDS_FILE)),
        };

        if !catalog.analyzer.is_empty() && !catalog.analyzer.contains(TEXT_PLACEHOLDER) {
            log_warning(&format!(
                "{} has no {} placeholder; the email body will not be included",
                ANALYZER_FILE, TEXT_PLACEHOLDER
            ));
        }

        log_prompts_loaded(&dir.display().to_string(), &missing);
        catalog
    }

    pub fn analyzer_template(&self) -> &str {
        non_empty_or(&self.analyzer, DEFAULT_ANALYZER_PROMPT)
    }

    /// Prompt de análise com o e-mail (sem espaços nas bordas) no lugar de `{text}`
    pub fn render_analyzer(&self, text: &str) -> String {
        self.analyzer_template().replace(TEXT_PLACEHOLDER, text.trim())
    }

    pub fn initial_instructions(&self) -> &str {
        non_empty_or(&self.initial_response, DEFAULT_INITIAL_PROMPT)
    }

    pub fn default_message(&self, category: Category) -> &str {
        match category {
            Category::Produtivo => non_empty_or(&self.productive, DEFAULT_PRODUCTIVE_MESSAGE),
            Category::Improdutivo => non_empty_or(&self.unproductive, DEFAULT_UNPRODUCTIVE_MESSAGE),
        }
    }

    pub fn error_ia_message(&self) -> &str {
        non_empty_or(&self.error_ia, DEFAULT_ERROR_IA_MESSAGE)
    }

    /// `None` quando não há mensagem de suporte configurada
    pub fn support_message(&self) -> Option<&str> {
        if self.support.trim().is_empty() {
            None
        } else {
            Some(&self.support)
        }
    }
}

fn read_prompt_file(dir: &Path, name: &str) -> Option<String> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(content) => Some(content.trim().to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log_warning(&format!("Prompt file not found: {}", path.display()));
            None
        }
        Err(e) => {
            log_error(&format!("Failed to read prompt file {}: {}", path.display(), e));
            None
        }
    }
}

fn parse_keywords(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
