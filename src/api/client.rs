//! Authenticated request client for the remote service.
//!
//! Holds the single bearer credential for the process. The credential is
//! fetched lazily on first use, attached to every call, and refreshed at
//! most once per call when the service answers `401`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::app::{Result, TrendlineError};
use crate::fetcher::{Request, Response, Transport};

pub const TOKEN_PATH: &str = "/auth/token";

const JSON: &str = "application/json";
const UNAUTHORIZED: u16 = 401;

/// Fixed client identity exchanged for an access token.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct ApiClient {
    transport: Arc<dyn Transport + Send + Sync>,
    credentials: ClientCredentials,
    token: Mutex<Option<String>>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>, credentials: ClientCredentials) -> Self {
        Self {
            transport,
            credentials,
            token: Mutex::new(None),
        }
    }

    /// Return the cached credential, exchanging client identity for a new
    /// one if the slot is empty.
    ///
    /// The slot stays locked for the duration of the exchange, so a burst of
    /// concurrent callers results in a single token request.
    pub async fn credential(&self) -> Result<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = self.exchange().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Issue an authenticated GET and decode the JSON body.
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let token = self.credential().await?;
        let mut response = self.send_with(endpoint, &token).await?;

        if response.status == UNAUTHORIZED {
            tracing::warn!("Token rejected for {}, refreshing and retrying once", endpoint);
            self.invalidate(&token).await;
            let fresh = self.credential().await?;
            response = self.send_with(endpoint, &fresh).await?;
        }

        if !response.is_success() {
            return Err(TrendlineError::Request {
                status: response.status,
            });
        }

        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn send_with(&self, endpoint: &str, token: &str) -> Result<Response> {
        let request = Request::get(endpoint)
            .header("Content-Type", JSON)
            .header("Accept", JSON)
            .header("Authorization", format!("Bearer {}", token));
        self.transport.send(request).await
    }

    async fn exchange(&self) -> Result<String> {
        let body = serde_json::to_vec(&self.credentials)?;
        let request = Request::post(TOKEN_PATH, body)
            .header("Content-Type", JSON)
            .header("Accept", JSON);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(TrendlineError::Auth {
                status: response.status,
            });
        }

        let token: TokenResponse = serde_json::from_slice(&response.body)?;
        tracing::info!("Acquired access token");
        Ok(token.access_token)
    }

    /// Clear the slot, but only if it still holds the rejected token. A
    /// concurrent caller may already have replaced it.
    async fn invalidate(&self, rejected: &str) {
        let mut slot = self.token.lock().await;
        if slot.as_deref() == Some(rejected) {
            *slot = None;
        }
    }
}
