/// Middleware layer para o Axum router
///
/// - Conversão de panics em respostas HTTP válidas

pub mod panic_handler;

pub use panic_handler::handle_panic;
