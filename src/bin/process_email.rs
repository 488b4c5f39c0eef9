/// Ferramenta de linha de comando para inspecionar o prompt enviado à LLM
/// Execute com: cargo run --bin process_email -- <arquivo.pdf|arquivo.txt|texto> [--run]
///
/// Sem `--run` apenas mostra o prompt de análise montado.
/// Com `--run` executa a triagem completa contra o servidor configurado.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;

use email_triage_service::config::Settings;
use email_triage_service::models::EmailInput;
use email_triage_service::services::{text_extractor, EmailProcessor, FileKind, PromptCatalog};
use ia_service::{IaServiceConfig, InferenceBackend, OllamaClient};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let mut run = false;
    let mut target = None;
    for arg in std::env::args().skip(1) {
        if arg == "--run" {
            run = true;
        } else if target.is_none() {
            target = Some(arg);
        }
    }

    let Some(target) = target else {
        bail!("uso: process_email <arquivo.pdf|arquivo.txt|texto> [--run]");
    };

    let settings = Settings::new().context("falha ao carregar configurações")?;
    let catalog = Arc::new(PromptCatalog::load(&settings.prompts.dir));

    let input = read_input(&target)?;

    println!("\n{}", "=".repeat(80));
    println!("TRIAGEM: Prompt de análise enviado à LLM");
    println!("{}\n", "=".repeat(80));

    let prompt = catalog.render_analyzer(input.as_str());
    println!("{}", prompt);
    println!("{}\n", "=".repeat(80));

    println!("📊 ESTATÍSTICAS DO PROMPT:");
    println!("  • Linhas: {}", prompt.lines().count());
    println!("  • Caracteres: {}", prompt.chars().count());
    println!("  • Palavras: {}", prompt.split_whitespace().count());
    println!();

    if !run {
        println!("ℹ️  Use --run para executar a triagem contra {}", settings.inference.base_url);
        return Ok(());
    }

    let ia_config = IaServiceConfig::new(&settings.inference.base_url)
        .with_model(settings.inference.model.clone())
        .with_timeout(settings.inference.timeout());
    let backend: Arc<dyn InferenceBackend> = Arc::new(OllamaClient::new(ia_config)?);

    println!("🤖 Executando triagem com o modelo {}...\n", backend.model_name());

    let processor = EmailProcessor::new(backend, catalog);
    let result = processor.process(&input).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Caminho existente vira arquivo (PDF/TXT); qualquer outro argumento é o próprio texto
fn read_input(target: &str) -> Result<EmailInput> {
    let path = Path::new(target);
    if !path.is_file() {
        return Ok(EmailInput::new(target)?);
    }

    let Some(kind) = FileKind::from_filename(target) else {
        bail!("{}", text_extractor::UNSUPPORTED_FILE_MESSAGE);
    };

    let text = text_extractor::extract_from_path(path, kind)
        .with_context(|| format!("falha ao ler {}", target))?;
    if text.trim().is_empty() {
        bail!("{}", text_extractor::EMPTY_FILE_MESSAGE);
    }

    Ok(EmailInput::new(text)?)
}
