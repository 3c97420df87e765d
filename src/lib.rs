pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};

pub use crate::adapters::{ApiKey, ViaCepClient, WeatherApiClient};
pub use crate::config::{toml_config::TomlConfig, ServiceConfig};
pub use crate::core::{FailureOutcome, ForecastEngine, PostalCode, WeatherResult};
pub use crate::utils::error::{Result, ServiceError};
