use crate::domain::model::{FailureOutcome, Locality, PostalCode, TemperatureReading};
use async_trait::async_trait;

/// Postal code to place name.
///
/// Implementations must keep the two negative results apart:
/// `LocationNotFound` when the directory answered "no such code",
/// `UpstreamFailure` when it could not be asked or its answer was unreadable.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve_locality(&self, code: &PostalCode) -> Result<Locality, FailureOutcome>;
}

/// Place name to current temperature. Only ever fails with `UpstreamFailure`.
#[async_trait]
pub trait TemperatureResolver: Send + Sync {
    async fn resolve_temperature(
        &self,
        locality: &Locality,
    ) -> Result<TemperatureReading, FailureOutcome>;
}
