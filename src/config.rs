use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_base_url: std::env::var("INTAKE_API_BASE_URL")
                .map_err(|_| {
                    anyhow::anyhow!("INTAKE_API_BASE_URL environment variable required")
                })
                .and_then(|base| {
                    if base.trim().is_empty() {
                        anyhow::bail!("INTAKE_API_BASE_URL cannot be empty");
                    }
                    if !base.starts_with("http://") && !base.starts_with("https://") {
                        anyhow::bail!("INTAKE_API_BASE_URL must start with http:// or https://");
                    }
                    url::Url::parse(&base)
                        .map_err(|e| anyhow::anyhow!("INTAKE_API_BASE_URL is not a valid URL: {}", e))?;
                    // The client appends "/api/..." paths itself
                    Ok(base.trim_end_matches('/').to_string())
                })?,
            http_timeout_secs: std::env::var("INTAKE_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("INTAKE_HTTP_TIMEOUT_SECS must be a number of seconds")
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Intake API base URL: {}", config.api_base_url);
        tracing::debug!("HTTP timeout: {}s", config.http_timeout_secs);

        Ok(config)
    }
}
