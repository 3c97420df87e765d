//! WeatherAPI current-conditions lookup.

use crate::adapters::fill_template;
use crate::domain::model::{FailureOutcome, Locality, TemperatureReading};
use crate::domain::ports::TemperatureResolver;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

pub const DEFAULT_URL_TEMPLATE: &str =
    "http://api.weatherapi.com/v1/current.json?key={key}&q={city}&lang=pt";

/// Secret WeatherAPI key. `Debug` never prints the value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for ApiKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(***)")
        }
    }
}

// Every level is optional so that an error body such as
// {"error": {"code": 2006}} or a null field still parses and reads as 0.0 °C.
#[derive(Debug, Default, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    current: Option<CurrentConditions>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentConditions {
    #[serde(default)]
    temp_c: Option<f64>,
}

impl CurrentWeatherResponse {
    fn celsius(&self) -> f64 {
        self.current
            .as_ref()
            .and_then(|c| c.temp_c)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    url_template: String,
    api_key: ApiKey,
}

impl WeatherApiClient {
    pub fn new(client: Client, url_template: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            client,
            url_template: url_template.into(),
            api_key,
        }
    }

    fn endpoint(&self, locality: &Locality) -> String {
        let city: String = form_urlencoded::byte_serialize(locality.as_str().as_bytes()).collect();
        fill_template(
            &self.url_template,
            &[("key", self.api_key.expose()), ("city", &city)],
        )
    }
}

#[async_trait]
impl TemperatureResolver for WeatherApiClient {
    async fn resolve_temperature(
        &self,
        locality: &Locality,
    ) -> Result<TemperatureReading, FailureOutcome> {
        let response = self
            .client
            .get(self.endpoint(locality))
            .send()
            .await
            .map_err(|_| FailureOutcome::UpstreamFailure)?;

        let body: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|_| FailureOutcome::UpstreamFailure)?;

        Ok(TemperatureReading::from_celsius(body.celsius()))
    }
}
