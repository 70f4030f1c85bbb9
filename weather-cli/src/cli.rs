use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use weather_core::{
    GatewayConfig,
    config::{BASE_URL_ENV, TIMEOUT_ENV},
    gateway_from_config,
};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Look up current weather for a city")]
pub struct Cli {
    /// Weather API base URL. Overrides WEATHER_API_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Give up on a lookup after this many seconds. Overrides WEATHER_API_TIMEOUT_SECS.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for city names until Esc (the default).
    Interactive,

    /// Show current weather for one city and exit.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = self.gateway_config()?;
        debug!(base_url = %config.base_url(), timeout = ?config.timeout(), "gateway configured");

        let gateway = gateway_from_config(&config)?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => session::interactive(gateway).await,
            Command::Show { city } => {
                let mut stdout = std::io::stdout();
                let shown = session::show(gateway, &city.join(" "), &mut stdout).await?;
                Ok(if shown { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
        }
    }

    /// Flags take precedence over the environment, which takes precedence over defaults.
    fn gateway_config(&self) -> anyhow::Result<GatewayConfig> {
        GatewayConfig::from_lookup(|key| {
            let flag = match key {
                BASE_URL_ENV => self.api_url.clone(),
                TIMEOUT_ENV => self.timeout_secs.map(|secs| secs.to_string()),
                _ => None,
            };
            flag.or_else(|| std::env::var(key).ok())
        })
    }
}
