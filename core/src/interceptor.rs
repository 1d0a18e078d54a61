//! Request/response interception around a `Transport`.
//!
//! Every outgoing call passes through the same pipeline:
//! attach the bearer token, send, then normalize the outcome into either a
//! 2xx `HttpResponse` or a `ClientError`. The pipeline is composed once in
//! `Interceptor::dispatch`; client operations never touch headers or status
//! codes themselves.

use async_trait::async_trait;
use tracing::error;

use crate::error::{ClientError, TransportError};
use crate::http::{HttpRequest, HttpResponse};

/// Executes a plain-data request against the network.
///
/// Implementations return non-2xx responses as `Ok` data. `Err` is reserved
/// for calls that produced no response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Holds the bearer token attached to every request.
#[derive(Clone)]
pub struct Interceptor {
    token: String,
}

impl std::fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor").field("token", &"<redacted>").finish()
    }
}

impl Interceptor {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn authorize(&self, request: &mut HttpRequest) {
        request.set_header("authorization", format!("Bearer {}", self.token));
    }

    /// Apply the three-branch normalization:
    /// a response with a non-2xx status keeps its status and status text,
    /// a call with no response becomes `502 Upstream Error`,
    /// anything else becomes `500 Internal Server Error`.
    pub fn normalize(
        &self,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Result<HttpResponse, ClientError> {
        let err = match outcome {
            Ok(response) if response.is_success() => return Ok(response),
            Ok(response) => {
                error!(
                    status = response.status,
                    status_text = %response.status_text,
                    body = %response.body,
                    "upstream responded with an error status"
                );
                ClientError::new(response.status_text, response.status)
            }
            Err(TransportError::NoResponse(reason)) => {
                error!(%reason, "no response received from upstream");
                ClientError::upstream()
            }
            Err(TransportError::Request(reason)) => {
                error!(%reason, "request to upstream could not be performed");
                ClientError::internal()
            }
        };
        Err(err)
    }

    pub async fn dispatch<T: Transport + ?Sized>(
        &self,
        transport: &T,
        mut request: HttpRequest,
    ) -> Result<HttpResponse, ClientError> {
        self.authorize(&mut request);
        let outcome = transport.send(request).await;
        self.normalize(outcome)
    }
}
