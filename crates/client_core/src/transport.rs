//! HTTP seam between the operation store and the backend service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (connect, send or body read failed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFailure {
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(value: reqwest::Error) -> Self {
        Self::new(value.to_string())
    }
}

#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Sends one POST to `path`. A JSON body is attached only when present.
    async fn post(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> std::result::Result<TransportReply, TransportFailure>;
}

pub struct HttpTransport {
    http: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(server_url).with_context(|| format!("invalid server url '{server_url}'"))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl BackendTransport for HttpTransport {
    async fn post(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> std::result::Result<TransportReply, TransportFailure> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| TransportFailure::new(err.to_string()))?;

        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        // Rejected responses are classified by status alone.
        let body = if status.is_success() {
            response.bytes().await?.to_vec()
        } else {
            Vec::new()
        };

        Ok(TransportReply {
            status: status.as_u16(),
            body,
        })
    }
}
