//! Reqwest-backed `Transport`.
//!
//! Owns transport details only: method/query/header/body mapping and the
//! classification of reqwest failures. Status interpretation is left to the
//! interceptor, so every status code comes back as data.

use std::time::Duration;

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Method, StatusCode};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::interceptor::Transport;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport. `None` keeps reqwest's default of no overall
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_method(request.method), request.url.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let status_text = status_text(status, response.extensions().get::<ReasonPhrase>());
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(map_transport_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Prefer the reason phrase sent on the wire, then the canonical phrase for
/// the code, then the bare code so the text is never empty.
fn status_text(status: StatusCode, wire: Option<&ReasonPhrase>) -> String {
    wire.map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
        .filter(|phrase| !phrase.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.as_u16().to_string())
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_builder() || error.is_redirect() {
        TransportError::Request(error.to_string())
    } else {
        TransportError::NoResponse(error.to_string())
    }
}
