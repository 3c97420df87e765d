use crate::core::{FailureOutcome, ForecastEngine, LocationResolver, TemperatureResolver};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    // absent behaves like an empty value and is rejected by validation
    #[serde(default)]
    pub cep: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

pub struct AppState<L: LocationResolver, T: TemperatureResolver> {
    engine: Arc<ForecastEngine<L, T>>,
    shutdown: CancellationToken,
}

impl<L: LocationResolver, T: TemperatureResolver> AppState<L, T> {
    pub fn new(engine: Arc<ForecastEngine<L, T>>, shutdown: CancellationToken) -> Self {
        Self { engine, shutdown }
    }
}

impl<L: LocationResolver, T: TemperatureResolver> Clone for AppState<L, T> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl IntoResponse for FailureOutcome {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self {
            FailureOutcome::InvalidInput | FailureOutcome::LocationNotFound => (
                status,
                Json(ErrorResponse {
                    message: self.message().to_string(),
                }),
            )
                .into_response(),
            FailureOutcome::UpstreamFailure => (status, self.message()).into_response(),
        }
    }
}

pub async fn weather_handler<L, T>(
    State(state): State<AppState<L, T>>,
    Query(query): Query<WeatherQuery>,
) -> Response
where
    L: LocationResolver + 'static,
    T: TemperatureResolver + 'static,
{
    match state
        .engine
        .run_with_cancellation(&query.cep, &state.shutdown)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(outcome) => outcome.into_response(),
    }
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
