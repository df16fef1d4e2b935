//! BankNext REST client
//!
//! One blocking HTTP client bound to the configured API base URL. Every
//! request goes through [`authorize`] right before it is sent, which asks
//! the [`CredentialSource`] for the current credential and adds the bearer
//! header when there is one. Nothing is retried and requests never time out
//! on the client side.

use std::sync::Arc;

use reqwest::blocking::{multipart::Form, Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{normalize_base_url, Config};
use crate::domain::result::{Error, Result};
use crate::ports::CredentialSource;

/// Attach the current credential, if any, to an outgoing request
pub fn authorize(builder: RequestBuilder, source: &dyn CredentialSource) -> RequestBuilder {
    match source.credential() {
        Some(credential) if !credential.is_empty() => {
            builder.header(AUTHORIZATION, credential.bearer_header())
        }
        _ => builder,
    }
}

/// HTTP client for the banking API
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base_url` (which includes the `/api` prefix)
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialSource>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        // The blocking builder defaults to a 30s timeout; turn it off
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config, credentials: Arc<dyn CredentialSource>) -> Result<Self> {
        Self::new(&config.api_base_url, credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path given as segments; each segment is
    /// percent-encoded, so account numbers and references can't escape it
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::config("API URL cannot take a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request; the credential is attached when it is sent
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    /// Intercept, send, and turn non-success statuses into errors
    fn execute(&self, segments: &[&str], builder: RequestBuilder) -> Result<Response> {
        let endpoint = segments.first().copied().unwrap_or("");
        let builder = authorize(builder, self.credentials.as_ref());

        let response = builder.send().map_err(|e| {
            tracing::debug!(endpoint, error = %e, "request failed before a response");
            self.map_request_error(e)
        })?;

        let status = response.status().as_u16();
        tracing::debug!(endpoint, status, "request completed");

        if response.status().is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(error_from_response(status, &body))
        }
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response
            .text()
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }

    /// `GET` a JSON document
    pub fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let builder = self.request(Method::GET, segments)?;
        Self::decode(self.execute(segments, builder)?)
    }

    /// `POST` a JSON body and decode the JSON response
    pub fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, segments)?.json(body);
        Self::decode(self.execute(segments, builder)?)
    }

    /// `POST` without a body; returns the response text
    pub fn post_empty(&self, segments: &[&str]) -> Result<String> {
        let builder = self.request(Method::POST, segments)?;
        self.execute(segments, builder)?
            .text()
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))
    }

    /// `GET` a binary document with query parameters
    pub fn get_bytes(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Vec<u8>> {
        let builder = self.request(Method::GET, segments)?.query(query);
        self.execute(segments, builder)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))
    }

    /// `POST` a multipart form and decode the JSON response
    pub fn post_multipart<T: DeserializeOwned>(&self, segments: &[&str], form: Form) -> Result<T> {
        let builder = self.request(Method::POST, segments)?.multipart(form);
        Self::decode(self.execute(segments, builder)?)
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_connect() {
            Error::Transport(format!("Unable to connect to the bank server at {}", self.base_url))
        } else {
            Error::Transport(format!("Request failed: {}", error))
        }
    }
}

/// Build the error for a non-success response.
///
/// A non-blank `message` field in a JSON body is the server talking to the
/// user and is kept verbatim; anything else only tells us the status.
pub fn error_from_response(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => Error::Server { status, message },
        None => Error::Http { status },
    }
}
