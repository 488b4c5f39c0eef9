//! Extração do texto do e-mail a partir de upload (PDF/TXT) ou campo de texto
//!
//! O upload é gravado em um arquivo temporário dentro do diretório de uploads
//! e removido ao final da extração, com ou sem erro.

use lopdf::Document;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{EmailInput, EmailSource, UploadedFile};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

pub const UNSUPPORTED_FILE_MESSAGE: &str = "Arquivo não suportado. Use apenas PDF ou TXT.";
pub const EMPTY_FILE_MESSAGE: &str = "O arquivo enviado está vazio ou não pôde ser lido.";
pub const NO_INPUT_MESSAGE: &str = "Nenhum texto ou arquivo válido enviado";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Txt,
}

impl FileKind {
    /// Tipo pela extensão (após o último ponto, sem diferenciar maiúsculas)
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "txt" => Some(FileKind::Txt),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Txt => "txt",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextExtractor {
    upload_dir: PathBuf,
}

impl TextExtractor {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Escolhe a origem do texto. O arquivo tem prioridade; um arquivo sem nome
    /// conta como ausente.
    pub fn resolve_source(
        file: Option<UploadedFile>,
        text: Option<String>,
    ) -> AppResult<EmailSource> {
        if let Some(file) = file.filter(|f| !f.filename.trim().is_empty()) {
            if FileKind::from_filename(&file.filename).is_none() {
                log_validation_error("file", &format!("unsupported file type: {}", file.filename));
                return Err(AppError::ValidationError(UNSUPPORTED_FILE_MESSAGE.to_string()));
            }
            return Ok(EmailSource::Upload(file));
        }

        match text {
            Some(text) if !text.trim().is_empty() => Ok(EmailSource::Text(text)),
            _ => {
                log_validation_error("text", "no text or file supplied");
                Err(AppError::ValidationError(NO_INPUT_MESSAGE.to_string()))
            }
        }
    }

    pub fn extract(&self, source: EmailSource) -> AppResult<EmailInput> {
        match source {
            EmailSource::Upload(file) => self.extract_upload(&file),
            EmailSource::Text(text) => {
                let input = EmailInput::new(text)
                    .map_err(|_| AppError::ValidationError(NO_INPUT_MESSAGE.to_string()))?;
                log_text_extracted("text field", input.as_str().chars().count());
                Ok(input)
            }
        }
    }

    pub fn extract_upload(&self, file: &UploadedFile) -> AppResult<EmailInput> {
        let kind = FileKind::from_filename(&file.filename)
            .ok_or_else(|| AppError::ValidationError(UNSUPPORTED_FILE_MESSAGE.to_string()))?;

        fs::create_dir_all(&self.upload_dir)?;

        let mut temp_file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&format!(".{}", kind.extension()))
            .tempfile_in(&self.upload_dir)?;
        temp_file.write_all(&file.bytes)?;
        temp_file.flush()?;

        let extracted = extract_from_path(temp_file.path(), kind);

        if let Err(e) = temp_file.close() {
            log_warning(&format!("Failed to remove temporary upload: {}", e));
        }

        let text = extracted?;
        if text.trim().is_empty() {
            log_validation_error("file", &format!("no text extracted from {}", file.filename));
            return Err(AppError::ValidationError(EMPTY_FILE_MESSAGE.to_string()));
        }

        log_text_extracted(&file.filename, text.chars().count());
        EmailInput::new(text)
    }
}

pub fn extract_from_path(path: &Path, kind: FileKind) -> AppResult<String> {
    match kind {
        FileKind::Txt => extract_txt(path),
        FileKind::Pdf => extract_pdf(path),
    }
}

fn extract_txt(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Texto de todas as páginas, separadas por quebra de linha. Páginas sem texto são ignoradas.
fn extract_pdf(path: &Path) -> AppResult<String> {
    let document = Document::load(path).map_err(|e| {
        log_warning(&format!("Failed to load PDF: {}", e));
        AppError::ValidationError(EMPTY_FILE_MESSAGE.to_string())
    })?;

    let mut page_texts = Vec::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) if !text.trim().is_empty() => page_texts.push(text.trim().to_string()),
            Ok(_) => {}
            Err(e) => log_warning(&format!("No text extracted from PDF page {}: {}", page_number, e)),
        }
    }

    Ok(page_texts.join("\n"))
}
