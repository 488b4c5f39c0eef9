//! Backend de inferência roteirizado para os testes unitários

use async_trait::async_trait;
use ia_service::{GenerateOptions, IaResult, IaServiceError, InferenceBackend};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<IaResult<String>>>,
    calls: Mutex<Vec<(String, GenerateOptions)>>,
}

impl ScriptedBackend {
    pub fn with_replies<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = IaResult<String>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(reply: &str) -> Self {
        Self::with_replies([Ok(reply.to_string())])
    }

    pub fn failing() -> Self {
        Self::with_replies([Err(IaServiceError::Timeout(60))])
    }

    pub fn calls(&self) -> Vec<(String, GenerateOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str, options: GenerateOptions) -> IaResult<String> {
        self.calls.lock().unwrap().push((prompt.to_string(), options));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(IaServiceError::Connection("no scripted reply left".to_string())))
    }

    async fn health_check(&self) -> IaResult<()> {
        Ok(())
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
