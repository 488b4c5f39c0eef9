/// Utilitários para manipulação segura de strings UTF-8

/// Sufixo anexado quando um texto é truncado
pub const ELLIPSIS: &str = "...";

/// Trunca uma string em `max_chars` caracteres (não bytes), sem cortar no meio de um caractere
///
/// # Exemplo
/// ```
/// use email_triage_service::utils::string_utils::truncate_chars;
///
/// assert_eq!(truncate_chars("Olá, mundo!", 3), "Olá");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &s[..byte_index],
        None => s,
    }
}

/// Trunca e adiciona um sufixo (como "...") apenas se o texto exceder `max_chars`
pub fn truncate_with_suffix(s: &str, max_chars: usize, suffix: &str) -> String {
    let truncated = truncate_chars(s, max_chars);
    if truncated.len() < s.len() {
        format!("{}{}", truncated, suffix)
    } else {
        truncated.to_string()
    }
}

/// Prévia do e-mail exibida junto ao resultado: 200 caracteres + "..."
pub fn preview(text: &str) -> String {
    truncate_with_suffix(text, 200, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_ascii() {
        let text = "Hello, World!";
        assert_eq!(truncate_chars(text, 5), "Hello");
        assert_eq!(truncate_chars(text, 100), text);
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        let text = "ação é ótima";
        assert_eq!(truncate_chars(text, 4), "ação");
        assert_eq!(truncate_chars("Hello 🌍 World", 7), "Hello 🌍");
    }

    #[test]
    fn test_truncate_with_suffix() {
        let text = "This is a very long text";
        assert_eq!(truncate_with_suffix(text, 9, "..."), "This is a...");
        assert_eq!(truncate_with_suffix("curto", 9, "..."), "curto");
    }

    #[test]
    fn test_preview_of_long_text() {
        let text = "a".repeat(250);
        let result = preview(&text);
        assert_eq!(result, format!("{}...", "a".repeat(200)));
    }

    #[test]
    fn test_preview_of_short_text_is_unchanged() {
        let text = "b".repeat(50);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn test_preview_at_exact_limit_is_unchanged() {
        let text = "é".repeat(200);
        assert_eq!(preview(&text), text);
    }
}
