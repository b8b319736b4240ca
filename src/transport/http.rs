//! HTTP transport adapter
//!
//! Wraps a shared `reqwest` client. Every route execution goes through
//! [`HttpTransport::send`], which returns the status, headers, and the raw
//! plus JSON-decoded body. Transport failures are fatal to the run.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::config::schema::{BodyFormat, HttpMethod};
use crate::error::TransportError;

/// Structured response data returned by the transport.
#[derive(Debug)]
pub struct TransportResponse {
    /// Response status code
    pub status: u16,

    /// Response headers, each name mapping to its ordered values
    pub headers: HashMap<String, Vec<String>>,

    /// Raw response body text
    pub raw_body: String,

    /// JSON-decoded body; `None` when the body is empty or not valid JSON
    pub json_body: Option<Value>,
}

/// HTTP transport built on a shared `reqwest` client.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Head => Self::HEAD,
            HttpMethod::Options => Self::OPTIONS,
        }
    }
}

impl HttpTransport {
    /// Creates the transport.
    ///
    /// `insecure` disables TLS certificate verification, for plans that
    /// target environments with self-signed certificates.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(insecure: bool) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }

    /// Sends one request and captures the structured response.
    ///
    /// The body, when present, is encoded per `format`; `bearer` attaches
    /// an `Authorization: Bearer` header.
    ///
    /// # Errors
    ///
    /// Returns an error on an unparsable URL, a body that cannot be
    /// encoded in the declared format, or any network/TLS failure.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
        format: BodyFormat,
    ) -> Result<TransportResponse, TransportError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))?;

        let mut request = self.client.request(method.into(), parsed);

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = match format {
                BodyFormat::Json => request.json(body),
                BodyFormat::Form => request.form(body),
            };
        }

        debug!(%method, url, "sending request");

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::BodyEncoding(e.to_string())
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();

        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(value.to_str().unwrap_or_default().to_string());
        }

        let raw_body = response
            .text()
            .await
            .map_err(|e| TransportError::BodyRead(e.to_string()))?;

        let json_body = serde_json::from_str(&raw_body).ok();

        Ok(TransportResponse {
            status,
            headers,
            raw_body,
            json_body,
        })
    }
}
