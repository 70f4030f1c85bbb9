use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use std::time::Duration;

/// Environment variable overriding the weather API base URL.
pub const BASE_URL_ENV: &str = "WEATHER_API_URL";

/// Environment variable holding an optional request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "WEATHER_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Immutable gateway configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Build a config for an explicit base URL with no timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self { base_url: parse_base_url(base_url)?, timeout: None })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Unset and blank variables both fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match read(BASE_URL_ENV) {
            Some(url) => parse_base_url(url.trim())
                .with_context(|| format!("Invalid value in {BASE_URL_ENV}"))?,
            None => parse_base_url(DEFAULT_BASE_URL)?,
        };

        let timeout = read(TIMEOUT_ENV)
            .map(|raw| parse_timeout_secs(raw.trim()))
            .transpose()
            .with_context(|| format!("Invalid value in {TIMEOUT_ENV}"))?;

        Ok(Self { base_url, timeout })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Failed to parse base URL '{raw}'"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "Unsupported scheme '{}' in base URL '{raw}'.\n\
             Hint: use an http:// or https:// address, e.g. {DEFAULT_BASE_URL}",
            url.scheme()
        ));
    }

    if url.cannot_be_a_base() {
        return Err(anyhow!("Base URL '{raw}' cannot carry a path"));
    }

    Ok(url)
}

/// Parse a positive number of seconds.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .parse()
        .with_context(|| format!("Timeout '{raw}' is not a whole number of seconds"))?;

    if secs == 0 {
        return Err(anyhow!(
            "Timeout must be at least 1 second.\n\
             Hint: unset {TIMEOUT_ENV} to wait without a limit."
        ));
    }

    Ok(Duration::from_secs(secs))
}
