//! Pending API request descriptor.
//!
//! [`ApiRequest`] carries everything the pipeline needs to (re)issue a call:
//! method, API-relative path, optional JSON body, and the single-retry
//! marker. The marker can only be set, never unset, so a request replayed
//! after a refresh can never trigger a second refresh.

use bridge_traits::{HttpMethod, HttpRequest};
use bytes::Bytes;
use serde::Serialize;

use crate::error::{AuthError, Result};

/// A request against the backend API, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Bytes>,
    retried: bool,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self> {
        let mut request = Self::new(HttpMethod::Post, path);
        request.body = Some(encode_json(body)?);
        Ok(request)
    }

    pub fn put_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self> {
        let mut request = Self::new(HttpMethod::Put, path);
        request.body = Some(encode_json(body)?);
        Ok(request)
    }

    /// Whether this request has already been replayed once.
    pub fn retried(&self) -> bool {
        self.retried
    }

    /// Consume the request and return it with the retry marker set.
    pub fn into_retried(mut self) -> Self {
        self.retried = true;
        self
    }

    /// Materialize the transport request against a base URL (origin, no
    /// trailing slash).
    pub(crate) fn to_http(&self, base_url: &str) -> HttpRequest {
        let mut outbound = HttpRequest::new(self.method, format!("{}{}", base_url, self.path));
        if let Some(body) = &self.body {
            outbound = outbound
                .header("Content-Type", "application/json")
                .body(body.clone());
        }
        outbound
    }
}

fn encode_json<T: Serialize>(body: &T) -> Result<Bytes> {
    let json = serde_json::to_vec(body)
        .map_err(|e| AuthError::Decode(format!("Failed to encode request body: {}", e)))?;
    Ok(Bytes::from(json))
}
