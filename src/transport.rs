// HTTP seam between the client logic and the vendor endpoints

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::error::ClientError;

/// Status and body of a completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// The request never produced a response (DNS, TLS, timeout, reset...)
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    // Form-encoded POST, used for the credential exchange
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<RawResponse, TransportError>;

    // Bearer-authenticated GET with a query string
    async fn get_with_bearer(
        &self,
        url: &str,
        query: &[(&'static str, String)],
        bearer: &str,
    ) -> Result<RawResponse, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout_ms: u64) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<RawResponse, TransportError> {
        let response = self.client.post(url).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }

    async fn get_with_bearer(
        &self,
        url: &str,
        query: &[(&'static str, String)],
        bearer: &str,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(bearer)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
