//! # Timecard Client
//!
//! An async HTTP client for a timecard status oracle server.
//!
//! Implements [`StatusOracle`] over the server's minimal contract
//! (`POST /jobs/{id}/start`, `POST /jobs/{id}/stop`, `GET /jobs/{id}/status`),
//! attaching a bearer credential to every call. A `401`/`403` response maps
//! to [`OracleError::Unauthorized`], the signal for the host application to
//! discard its credentials and re-authenticate.
//!
//! ## Example
//!
//! ```no_run
//! use timecard_client::HttpOracle;
//! use timecard_core::prelude::*;
//!
//! async fn run() -> Result<(), OracleError> {
//!     let oracle = HttpOracle::new("http://localhost:3000", Some("my-token".into()));
//!
//!     let record = oracle.start("42").await?;
//!     assert!(record.is_open());
//!
//!     oracle.stop("42").await?;
//!     Ok(())
//! }
//! ```

use reqwest::{Client, Response, StatusCode};
use timecard_core::prelude::{routes::*, *};
use tracing::warn;

#[derive(Clone)]
pub struct HttpOracle {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl HttpOracle {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            token,
        }
    }

    fn auth_request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            builder.header("Authorization", format!("Bearer {token}"))
        } else {
            builder
        }
    }

    fn job_url(&self, route: &str, job_id: &str) -> String {
        let path = route.replace("{id}", job_id);
        format!("{}{}", self.base_url, path)
    }

    async fn check(&self, response: Response) -> Result<Response, OracleError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = error_text(response).await;
        warn!(status = status.as_u16(), "oracle request failed: {text}");

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => OracleError::Unauthorized,
            s if s.is_client_error() => OracleError::Rejected(text),
            s => OracleError::Server(s.as_u16(), text),
        })
    }

    async fn command(&self, route: &str, job_id: &str) -> Result<IntervalRecord, OracleError> {
        let url = self.job_url(route, job_id);
        let response = self
            .auth_request(self.client.post(&url))
            .send()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        self.check(response)
            .await?
            .json()
            .await
            .map_err(|e| OracleError::Malformed(e.to_string()))
    }
}

/// Pulls the server's `error` field out of a failure body, falling back to
/// the raw text.
async fn error_text(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(text)
}

impl StatusOracle for HttpOracle {
    async fn start(&self, job_id: &str) -> Result<IntervalRecord, OracleError> {
        self.command(JOB_START, job_id).await
    }

    async fn stop(&self, job_id: &str) -> Result<IntervalRecord, OracleError> {
        self.command(JOB_STOP, job_id).await
    }

    async fn status(&self, job_id: &str) -> Result<Option<IntervalRecord>, OracleError> {
        let url = self.job_url(JOB_STATUS, job_id);
        let response = self
            .auth_request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        // The server reports "never tracked" as a JSON null body.
        self.check(response)
            .await?
            .json()
            .await
            .map_err(|e| OracleError::Malformed(e.to_string()))
    }
}
