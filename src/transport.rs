//! HTTP transport for the gateway.
//!
//! The `Transport` trait is the seam between the client and the wire: one
//! synchronous round trip per call, JSON bodies in and out, no retries.
//! `HttpTransport` is the production implementation; tests substitute their
//! own.

use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Decoded HTTP response: status plus JSON body.
///
/// A bodyless response (e.g. 204 on DELETE) decodes to `Value::Null`.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

/// Synchronous request/response abstraction consumed by `GatewayClient`.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Response>;
}

/// `reqwest::blocking` transport with HTTP basic authentication.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    username: String,
    password: String,
}

impl HttpTransport {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Transport with a request timeout applied to every round trip.
    pub fn with_timeout(
        username: &str,
        password: &str,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        request = request.basic_auth(&self.username, Some(&self.password));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| Error::Decode(e.to_string()))?
        };
        Ok(Response { status, body })
    }
}
