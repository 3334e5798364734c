use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub name: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key for Perplexity is not set.")]
    MissingApiKey,

    /// Transport failure, non-2xx, or a body that is not JSON.
    #[error("{0}")]
    Upstream(String),

    /// JSON came back but without a message to read.
    #[error("model reply had no message content")]
    MissingContent,
}

/// A chat model with web search that answers the fact-check prompt.
#[async_trait]
pub trait FactCheckProvider: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError>;
    fn info(&self) -> ProviderInfo;
}
