//! Limpeza do texto gerado pela IA antes de compor a resposta

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::string_utils::{truncate_with_suffix, ELLIPSIS};

/// Tamanho máximo (em caracteres) do texto da IA na resposta
pub const MAX_RESPONSE_CHARS: usize = 1200;

// Tags HTML, inclusive as que atravessam linhas
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<.*?>").expect("valid tag regex"));

// Campos de preenchimento como [Nome], {Empresa} ou (Cargo)
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]|\{.*?\}|\(.*?\)").expect("valid placeholder regex"));

// Do termo de assinatura até o fim da linha
static SIGNOFF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(atenciosamente|cordialmente|equipe financeira|equipe de atendimento|suporte financeiro|empresa xyz|nome da empresa|função|cargo).*",
    )
    .expect("valid sign-off regex")
});

/// Remove marcações, campos de preenchimento e assinaturas; descarta linhas
/// vazias e limita o tamanho a [`MAX_RESPONSE_CHARS`].
pub fn clean_response(text: &str) -> String {
    let cleaned = TAG_RE.replace_all(text, "");
    let cleaned = PLACEHOLDER_RE.replace_all(&cleaned, "");
    let cleaned = SIGNOFF_RE.replace_all(&cleaned, "");

    let full_text = cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    truncate_with_suffix(&full_text, MAX_RESPONSE_CHARS, ELLIPSIS)
}
