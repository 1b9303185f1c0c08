use std::time::Duration;
use url::Url;

/// Runtime configuration, resolved from the environment exactly once at
/// startup. Call sites never read env vars or hardcode URLs themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the EventFlow backend (scheme + host, no trailing slash).
    pub api_base_url: String,
    /// Per-request timeout applied to every backend call.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_base_url: std::env::var("EVENTFLOW_API_URL")
                .map_err(|_| {
                    anyhow::anyhow!("EVENTFLOW_API_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("EVENTFLOW_API_URL cannot be empty");
                    }
                    let parsed = Url::parse(url.trim()).map_err(|e| {
                        anyhow::anyhow!("EVENTFLOW_API_URL is not a valid URL: {}", e)
                    })?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("EVENTFLOW_API_URL must start with http:// or https://");
                    }
                    Ok(url.trim().trim_end_matches('/').to_string())
                })?,
            request_timeout_secs: std::env::var("EVENTFLOW_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .ok()
                .filter(|secs| *secs >= 1)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "EVENTFLOW_REQUEST_TIMEOUT_SECS must be a whole number of seconds >= 1"
                    )
                })?,
        };

        // Log successful configuration load (no secrets involved)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Backend URL: {}", config.api_base_url);
        tracing::debug!("Request timeout: {}s", config.request_timeout_secs);

        Ok(config)
    }

    /// Timeout as a `Duration`, ready for the HTTP client builder.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
