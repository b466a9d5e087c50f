//! Generative-language service adapters module

pub mod gemini;

use crate::error::Result;
use async_trait::async_trait;

pub use gemini::GeminiClient;

/// Completion returned by the generative service.
///
/// `text` is `None` when the call succeeded but the payload carried no
/// usable text; call sites substitute their own placeholder. Failure is a
/// separate condition reported through `Result`.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: Option<String>,
}

/// Text-completion endpoint treated as an opaque, unreliable collaborator
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send a prompt and return the generated text
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Completion>;
}
