use anyhow::Context;
use async_trait::async_trait;

use crate::config::AppConfig;
use crate::provider::{FactCheckProvider, ProviderError, ProviderInfo};

pub struct PerplexityProvider {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl PerplexityProvider {
    pub fn new(cfg: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.upstream_timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: cfg.perplexity_base_url.trim_end_matches('/').to_string(),
            api_key: cfg.perplexity_api_key.clone(),
            model: cfg.perplexity_model.clone(),
            client,
        })
    }
}

#[async_trait]
impl FactCheckProvider for PerplexityProvider {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ]
        });

        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;
        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(ProviderError::MissingContent)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "perplexity".to_string(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }
    }
}
