use aho_corasick::AhoCorasick;

use crate::utils::logging::log_error;

/// Detecta pedidos de suporte por palavra-chave (substring, sem diferenciar maiúsculas)
#[derive(Debug, Clone)]
pub struct SupportDetector {
    matcher: Option<AhoCorasick>,
}

impl SupportDetector {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Self { matcher: None };
        }

        let matcher = match AhoCorasick::new(&keywords) {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                log_error(&format!("Failed to build support keyword matcher: {}", e));
                None
            }
        };

        Self { matcher }
    }

    pub fn requested(&self, text: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(&text.to_lowercase()),
            None => false,
        }
    }
}
