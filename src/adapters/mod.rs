// Adapters layer: reqwest-backed implementations of the domain ports.

pub mod viacep;
pub mod weatherapi;

pub use viacep::ViaCepClient;
pub use weatherapi::{ApiKey, WeatherApiClient};

use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("cep-weather/", env!("CARGO_PKG_VERSION"));

/// One client shared by both adapters so they reuse the connection pool.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Replaces each `{name}` placeholder in `template` with its value.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut url = template.to_string();
    for (name, value) in values {
        url = url.replace(&format!("{{{}}}", name), value);
    }
    url
}
