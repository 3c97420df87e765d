use crate::domain::model::{FailureOutcome, PostalCode, WeatherResult};
use crate::domain::ports::{LocationResolver, TemperatureResolver};
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Where a lookup is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastStage {
    Validating,
    ResolvingLocation,
    ResolvingTemperature,
    Composed,
}

impl fmt::Display for ForecastStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForecastStage::Validating => "validating",
            ForecastStage::ResolvingLocation => "resolving_location",
            ForecastStage::ResolvingTemperature => "resolving_temperature",
            ForecastStage::Composed => "composed",
        };
        f.write_str(name)
    }
}

/// Runs validate -> locality -> temperature -> compose, stopping at the first failure.
pub struct ForecastEngine<L: LocationResolver, T: TemperatureResolver> {
    location: L,
    temperature: T,
}

impl<L: LocationResolver, T: TemperatureResolver> ForecastEngine<L, T> {
    pub fn new(location: L, temperature: T) -> Self {
        Self {
            location,
            temperature,
        }
    }

    pub async fn run(&self, raw_cep: &str) -> Result<WeatherResult, FailureOutcome> {
        self.run_with_cancellation(raw_cep, &CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), but cancelling `token` aborts the outbound
    /// call in progress and ends the lookup with `UpstreamFailure`.
    pub async fn run_with_cancellation(
        &self,
        raw_cep: &str,
        token: &CancellationToken,
    ) -> Result<WeatherResult, FailureOutcome> {
        let outcome = self.pipeline(raw_cep, token).await;
        match &outcome {
            Ok(result) => {
                tracing::debug!(
                    stage = %ForecastStage::Composed,
                    temp_c = result.temp_c,
                    "✅ forecast composed"
                );
            }
            Err((stage, failure)) => {
                tracing::info!(
                    stage = %stage,
                    outcome = ?failure,
                    "❌ forecast lookup stopped"
                );
            }
        }
        outcome.map_err(|(_, failure)| failure)
    }

    async fn pipeline(
        &self,
        raw_cep: &str,
        token: &CancellationToken,
    ) -> Result<WeatherResult, (ForecastStage, FailureOutcome)> {
        let code = PostalCode::parse(raw_cep).map_err(|e| (ForecastStage::Validating, e))?;

        let locality = cancellable(token, self.location.resolve_locality(&code))
            .await
            .map_err(|e| (ForecastStage::ResolvingLocation, e))?;
        tracing::debug!(cep = %code, locality = %locality, "📡 locality resolved");

        let reading = cancellable(token, self.temperature.resolve_temperature(&locality))
            .await
            .map_err(|e| (ForecastStage::ResolvingTemperature, e))?;

        Ok(WeatherResult::compose(reading))
    }
}

async fn cancellable<V, F>(token: &CancellationToken, call: F) -> Result<V, FailureOutcome>
where
    F: Future<Output = Result<V, FailureOutcome>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(FailureOutcome::UpstreamFailure),
        outcome = call => outcome,
    }
}
