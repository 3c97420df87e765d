//! ViaCEP postal-code directory.

use crate::adapters::fill_template;
use crate::domain::model::{FailureOutcome, Locality, PostalCode};
use crate::domain::ports::LocationResolver;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_URL_TEMPLATE: &str = "https://viacep.com.br/ws/{cep}/json/";

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    erro: Option<NotFoundFlag>,
}

/// ViaCEP has sent `"erro": true` and `"erro": "true"` over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotFoundFlag {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl NotFoundFlag {
    fn is_set(&self) -> bool {
        match self {
            NotFoundFlag::Bool(b) => *b,
            NotFoundFlag::Text(s) => s == "true",
            NotFoundFlag::Other(_) => false,
        }
    }
}

impl ViaCepResponse {
    fn into_locality(self) -> Result<Locality, FailureOutcome> {
        if self.erro.as_ref().is_some_and(NotFoundFlag::is_set) {
            return Err(FailureOutcome::LocationNotFound);
        }
        match self.localidade {
            Some(name) if !name.is_empty() => Ok(Locality::new(name)),
            _ => Err(FailureOutcome::LocationNotFound),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    url_template: String,
}

impl ViaCepClient {
    pub fn new(client: Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }

    fn endpoint(&self, code: &PostalCode) -> String {
        fill_template(&self.url_template, &[("cep", code.as_str())])
    }
}

#[async_trait]
impl LocationResolver for ViaCepClient {
    async fn resolve_locality(&self, code: &PostalCode) -> Result<Locality, FailureOutcome> {
        let response = self
            .client
            .get(self.endpoint(code))
            .send()
            .await
            .map_err(|_| FailureOutcome::UpstreamFailure)?;

        // status is deliberately not checked: a parseable body decides the outcome
        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|_| FailureOutcome::UpstreamFailure)?;

        body.into_locality()
    }
}
