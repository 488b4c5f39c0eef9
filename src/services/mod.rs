pub mod classifier;
pub mod processor;
pub mod prompt_catalog;
pub mod responder;
pub mod support_detector;
pub mod text_cleaner;
pub mod text_extractor;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifier::{parse_category, EmailClassifier};
pub use processor::EmailProcessor;
pub use prompt_catalog::PromptCatalog;
pub use responder::EmailResponder;
pub use support_detector::SupportDetector;
pub use text_cleaner::clean_response;
pub use text_extractor::{FileKind, TextExtractor};
