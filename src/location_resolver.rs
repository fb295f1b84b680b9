//! Location Resolution Module
//!
//! This module resolves a CEP into the address record published by ViaCEP.
//! The locality name of that record is what the weather lookup consumes.

use crate::error::LocationError;
use crate::models::{CepAddress, ERROR_MARKER};
use reqwest::Client;
use tracing::{debug, instrument};

/// Client for the ViaCEP postal-code service
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Client,
    base_url: String,
}

impl LocationResolver {
    /// Create a resolver sending requests to `base_url` (e.g. `http://viacep.com.br`)
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Resolve a postal code into its address record.
    ///
    /// The HTTP status is ignored. A body containing the error marker anywhere
    /// is reported as [`LocationError::NotFound`], before any JSON decoding.
    #[instrument(skip(self))]
    pub async fn resolve(&self, cep: &str) -> Result<CepAddress, LocationError> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        debug!("Calling ViaCEP: {}", url);

        let body = self.client.get(&url).send().await?.text().await?;

        if body.contains(ERROR_MARKER) {
            debug!("ViaCEP flagged postal code {} as unknown", cep);
            return Err(LocationError::NotFound);
        }

        let address: CepAddress = serde_json::from_str(&body)?;
        debug!(
            "Resolved postal code {} to {} ({})",
            cep, address.locality, address.state
        );

        Ok(address)
    }
}
