use std::time::Duration;

use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub perplexity_api_key: Option<String>,
    pub perplexity_base_url: String,
    pub perplexity_model: String,
    pub upstream_timeout: Duration,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Missing key is not fatal at boot; every check then answers 500.
        let perplexity_api_key = get("PERPLEXITY_API_KEY").filter(|k| !k.trim().is_empty());
        let perplexity_base_url = get("PERPLEXITY_BASE_URL")
            .unwrap_or_else(|| "https://api.perplexity.ai".to_string());
        let perplexity_model = get("PERPLEXITY_MODEL").unwrap_or_else(|| "sonar-pro".to_string());
        let timeout_secs = match get("VERIFIER_UPSTREAM_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("VERIFIER_UPSTREAM_TIMEOUT_SECS must be an integer, got {v:?}"))?,
            None => 60,
        };
        let bind_addr = get("VERIFIER_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());

        if !perplexity_base_url.starts_with("http://") && !perplexity_base_url.starts_with("https://") {
            bail!("PERPLEXITY_BASE_URL must start with http:// or https://");
        }

        Ok(Self {
            perplexity_api_key,
            perplexity_base_url,
            perplexity_model,
            upstream_timeout: Duration::from_secs(timeout_secs),
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[]).unwrap();
        assert!(cfg.perplexity_api_key.is_none());
        assert_eq!(cfg.perplexity_base_url, "https://api.perplexity.ai");
        assert_eq!(cfg.perplexity_model, "sonar-pro");
        assert_eq!(cfg.upstream_timeout, Duration::from_secs(60));
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_blank_key_treated_as_missing() {
        let cfg = load(&[("PERPLEXITY_API_KEY", "  ")]).unwrap();
        assert!(cfg.perplexity_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = load(&[
            ("PERPLEXITY_API_KEY", "pplx-123"),
            ("PERPLEXITY_BASE_URL", "http://127.0.0.1:9000"),
            ("VERIFIER_UPSTREAM_TIMEOUT_SECS", "5"),
            ("VERIFIER_BIND_ADDR", "127.0.0.1:8001"),
        ])
        .unwrap();
        assert_eq!(cfg.perplexity_api_key.as_deref(), Some("pplx-123"));
        assert_eq!(cfg.upstream_timeout, Duration::from_secs(5));
        assert_eq!(cfg.bind_addr, "127.0.0.1:8001");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("PERPLEXITY_BASE_URL", "api.perplexity.ai")]).is_err());
        assert!(load(&[("VERIFIER_UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
