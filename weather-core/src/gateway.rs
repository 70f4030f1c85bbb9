use crate::{
    config::GatewayConfig,
    gateway::http::HttpGateway,
    model::{LookupFailure, WeatherReport},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod http;

/// Boundary for the single outbound weather lookup.
///
/// Implementations must turn every failure into a [`LookupFailure`]; nothing
/// else may escape. Callers pass an already trimmed, non-empty city name.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, LookupFailure>;
}

/// Construct the HTTP gateway for a resolved configuration.
pub fn gateway_from_config(config: &GatewayConfig) -> anyhow::Result<Arc<dyn WeatherGateway>> {
    let gateway = HttpGateway::new(config)?;
    Ok(Arc::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn gateway_from_config_builds_http_gateway() {
        let cfg = GatewayConfig::new(DEFAULT_BASE_URL).unwrap();
        let gateway = gateway_from_config(&cfg).expect("gateway should build");

        assert!(format!("{gateway:?}").contains("HttpGateway"));
    }
}
