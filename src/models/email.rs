//! Tipos de domínio da triagem de e-mails

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{preview, AppError, AppResult};

/// Categoria atribuída ao e-mail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Requer ação da equipe
    Produtivo,
    /// Não requer ação; também é o valor seguro para saídas ambíguas
    #[default]
    Improdutivo,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produtivo => "produtivo",
            Category::Improdutivo => "improdutivo",
        }
    }

    /// Reconhece apenas o rótulo exato (já em minúsculas)
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "produtivo" => Some(Category::Produtivo),
            "improdutivo" => Some(Category::Improdutivo),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arquivo recebido no upload, ainda não validado
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Origem do texto de uma requisição
#[derive(Debug, Clone)]
pub enum EmailSource {
    Upload(UploadedFile),
    Text(String),
}

/// Texto do e-mail, garantidamente não vazio após `trim`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailInput(String);

impl EmailInput {
    pub fn new(text: impl Into<String>) -> AppResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Texto vazio ou arquivo sem conteúdo".to_string(),
            ));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Partes da resposta automática, mantidas separadas até a exibição
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedReply {
    /// Texto gerado pela IA já limpo, ou a mensagem de erro da IA
    pub resposta_ia: String,
    /// Mensagem padrão da categoria
    pub mensagem_padrao: String,
    pub suporte_solicitado: bool,
    /// Presente apenas quando o suporte foi solicitado e há mensagem configurada
    pub mensagem_suporte: Option<String>,
    /// Nota interna quando a geração pela IA falhou
    pub diagnostico: Option<String>,
}

impl ComposedReply {
    /// Texto exibido ao usuário: partes não vazias separadas por ", ".
    /// O diagnóstico não entra no texto exibido.
    pub fn render(&self) -> String {
        let mut parts: Vec<&str> = vec![self.resposta_ia.as_str(), self.mensagem_padrao.as_str()];
        if let Some(suporte) = &self.mensagem_suporte {
            parts.push(suporte);
        }

        parts
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Resultado devolvido pelo endpoint `/process`
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResult {
    pub categoria: Category,
    pub resposta: String,
    pub texto_processado: String,
    pub detalhes: ComposedReply,
}

impl ReplyResult {
    pub fn new(input: &EmailInput, categoria: Category, detalhes: ComposedReply) -> Self {
        Self {
            categoria,
            resposta: detalhes.render(),
            texto_processado: preview(input.as_str()),
            detalhes,
        }
    }
}
