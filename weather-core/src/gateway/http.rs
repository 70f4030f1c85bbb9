use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::GatewayConfig,
    model::{LookupFailure, WeatherReport},
};

use super::WeatherGateway;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: Url,
    http: Client,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().context("Failed to build HTTP client for weather API")?;

        Ok(Self { base_url: config.base_url().clone(), http })
    }

    /// `{base}/weather/{city}`, with the city encoded as a single path segment.
    pub fn weather_url(&self, city: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments.pop_if_empty().push("weather").push(city);
        }
        Some(url)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[async_trait]
impl WeatherGateway for HttpGateway {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, LookupFailure> {
        let Some(url) = self.weather_url(city) else {
            warn!(base_url = %self.base_url, "base URL cannot carry a path");
            return Err(LookupFailure::internal());
        };

        debug!(%url, city, "requesting current weather");

        let res = match self.http.get(url).send().await {
            Ok(res) => res,
            Err(err) => {
                warn!(error = %err, city, "weather request failed without a response");
                return Err(LookupFailure::internal());
            }
        };

        let status = res.status();
        let outcome = match res.text().await {
            Ok(body) => classify_response(city, status, &body),
            Err(err) if status.is_success() => {
                warn!(error = %err, city, "failed to read weather response body");
                Err(LookupFailure::internal())
            }
            Err(_) => classify_response(city, status, ""),
        };

        match &outcome {
            Ok(_) => debug!(city, status = status.as_u16(), "weather lookup succeeded"),
            Err(failure) => warn!(
                city,
                status = status.as_u16(),
                code = ?failure.code(),
                "weather lookup failed"
            ),
        }

        outcome
    }
}

/// Map an HTTP response onto a report or a normalized failure.
pub fn classify_response(
    city: &str,
    status: StatusCode,
    body: &str,
) -> Result<WeatherReport, LookupFailure> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|err| {
            warn!(error = %err, body = %truncate_body(body), "malformed weather payload");
            LookupFailure::internal()
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(LookupFailure::city_not_found(city));
    }

    Err(LookupFailure::api_error(extract_detail(body)))
}

fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) => Some(detail),
        _ => None,
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
