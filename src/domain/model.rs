use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const POSTAL_CODE_LEN: usize = 8;

/// Why a lookup stopped. Each variant maps to exactly one client-facing response.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// The postal code is malformed; no upstream was contacted.
    #[error("invalid zipcode")]
    InvalidInput,

    /// The postal-code directory answered but knows no such code.
    #[error("can not find zipcode")]
    LocationNotFound,

    /// An upstream could not be reached, timed out, was cancelled, or sent an unreadable body.
    #[error("failed to fetch weather")]
    UpstreamFailure,
}

impl FailureOutcome {
    /// HTTP status the outcome is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            FailureOutcome::InvalidInput => 422,
            FailureOutcome::LocationNotFound => 404,
            FailureOutcome::UpstreamFailure => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FailureOutcome::InvalidInput => "invalid zipcode",
            FailureOutcome::LocationNotFound => "can not find zipcode",
            FailureOutcome::UpstreamFailure => "failed to fetch weather",
        }
    }
}

/// A syntactically valid CEP: exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(raw: &str) -> Result<Self, FailureOutcome> {
        if raw.len() == POSTAL_CODE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(FailureOutcome::InvalidInput)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PostalCode {
    type Err = FailureOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Place name exactly as the postal-code directory returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality(String);

impl Locality {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub celsius: f64,
}

impl TemperatureReading {
    pub fn from_celsius(celsius: f64) -> Self {
        Self { celsius }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherResult {
    /// Kelvin uses a flat +273 offset; clients depend on that exact value.
    pub fn compose(reading: TemperatureReading) -> Self {
        let c = reading.celsius;
        Self {
            temp_c: c,
            temp_f: c * 1.8 + 32.0,
            temp_k: c + 273.0,
        }
    }
}

impl From<TemperatureReading> for WeatherResult {
    fn from(reading: TemperatureReading) -> Self {
        Self::compose(reading)
    }
}
