//! Core library for the `weather` client.
//!
//! This crate defines:
//! - Gateway configuration resolved once from the environment
//! - The request gateway that performs a city lookup and normalizes failures
//! - The search state machine and the controller that drives it
//! - Shared domain models (reports, failures)
//!
//! It is used by `weather-cli`, but any other front end can drive the same
//! controller and render its [`SearchView`].

pub mod config;
pub mod controller;
pub mod gateway;
pub mod model;
pub mod state;

pub use config::GatewayConfig;
pub use controller::{Completion, SearchController};
pub use gateway::{WeatherGateway, gateway_from_config, http::HttpGateway};
pub use model::{FailureCode, LookupFailure, WeatherReport};
pub use state::{LookupTicket, SearchPhase, SearchState, SearchView};
