#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{self, viacep, weatherapi, ApiKey, ViaCepClient, WeatherApiClient};
use crate::core::ForecastEngine;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Fully resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub location_url_template: String,
    pub weather_url_template: String,
    pub weather_api_key: ApiKey,
    pub request_timeout_seconds: u64,
    pub bind_address: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            location_url_template: viacep::DEFAULT_URL_TEMPLATE.to_string(),
            weather_url_template: weatherapi::DEFAULT_URL_TEMPLATE.to_string(),
            weather_api_key: ApiKey::default(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind_address", &self.bind_address)
    }

    /// Wires the HTTP adapters into an engine. The API key is handed over here
    /// and nowhere else.
    pub fn build_engine(&self) -> Result<ForecastEngine<ViaCepClient, WeatherApiClient>> {
        let client = adapters::build_http_client(self.request_timeout())?;
        let location = ViaCepClient::new(client.clone(), self.location_url_template.clone());
        let temperature = WeatherApiClient::new(
            client,
            self.weather_url_template.clone(),
            self.weather_api_key.clone(),
        );
        Ok(ForecastEngine::new(location, temperature))
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url_template(
            "location.url_template",
            &self.location_url_template,
            &["cep"],
        )?;
        validation::validate_url_template(
            "weather.url_template",
            &self.weather_url_template,
            &["key", "city"],
        )?;
        validation::validate_positive_number(
            "http.request_timeout_seconds",
            self.request_timeout_seconds,
            1,
        )?;
        self.socket_addr()?;
        Ok(())
    }
}
