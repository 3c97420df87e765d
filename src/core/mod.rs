pub mod forecast;

pub use crate::domain::model::{
    FailureOutcome, Locality, PostalCode, TemperatureReading, WeatherResult,
};
pub use crate::domain::ports::{LocationResolver, TemperatureResolver};
pub use forecast::{ForecastEngine, ForecastStage};
