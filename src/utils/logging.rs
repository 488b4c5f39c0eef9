use tracing::{info, warn, error, debug};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_prompts_loaded(dir: &str, missing: &[&str]) {
    if missing.is_empty() {
        info!("📄 Prompt catalog loaded from {}", dir);
    } else {
        warn!("📄 Prompt catalog loaded from {} - missing: {}", dir, missing.join(", "));
    }
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Email triage server starting on port {}", port);
}

pub fn log_server_ready(host: &str, port: u16) {
    info!("✅ Server ready and listening on http://{}:{}", host, port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_text_extracted(source: &str, chars: usize) {
    info!("📥 Text extracted from {}: {} chars", source, chars);
}

pub fn log_classification(category: &str, raw: &str) {
    info!("🏷️ Email classified as '{}' (model output: {:?})", category, raw);
}

pub fn log_inference_error(stage: &str, error: &str) {
    error!("❌ Inference error during {}: {}", stage, error);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
