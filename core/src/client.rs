//! Request builder, response parser and async client for the users API.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes a 2xx `HttpResponse`.
//! Both halves are pure and testable without I/O. The async methods glue
//! them together through `Interceptor::dispatch`, which is the only place a
//! bearer token is attached or a failure is normalized.
//!
//! `GoRestClient` holds read-only configuration and no mutable state, so
//! concurrent calls are independent.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info};

use crate::config::GoRestConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::interceptor::{Interceptor, Transport};
use crate::types::{CreateUser, SearchField, UpdateUser, User, UserId};

pub const PAGINATION_TOTAL_HEADER: &str = "x-pagination-total";
pub const DEFAULT_PAGE: u32 = 0;

/// The six remote operations, abstracted so `UsersService` can be handed a
/// fake in tests.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn create_user(&self, input: &CreateUser) -> Result<User, ClientError>;
    async fn fetch_user(&self, id: UserId) -> Result<User, ClientError>;
    async fn fetch_users(&self, page: u32) -> Result<Vec<User>, ClientError>;
    async fn search_users(&self, field: SearchField, value: &str) -> Result<Vec<User>, ClientError>;
    async fn update_user(&self, input: &UpdateUser, id: UserId) -> Result<User, ClientError>;
    async fn delete_user(&self, id: UserId) -> Result<bool, ClientError>;
}

/// Transport Client for the upstream `/users` resource.
#[derive(Debug, Clone)]
pub struct GoRestClient<T> {
    base_url: String,
    interceptor: Interceptor,
    transport: T,
}

impl<T: Transport> GoRestClient<T> {
    pub fn new(config: &GoRestConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            interceptor: Interceptor::new(config.token.clone()),
            transport,
        }
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        self.interceptor.dispatch(&self.transport, request).await
    }
}

impl<T> GoRestClient<T> {
    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ClientError> {
        let mut req = HttpRequest::new(HttpMethod::Post, self.users_url());
        attach_json(&mut req, input)?;
        Ok(req)
    }

    pub fn build_fetch_user(&self, id: UserId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.user_url(id))
    }

    pub fn build_fetch_users(&self, page: u32) -> HttpRequest {
        let mut req = HttpRequest::new(HttpMethod::Get, self.users_url());
        req.query.push(("page".to_string(), page.to_string()));
        req
    }

    pub fn build_search_users(&self, field: SearchField, value: &str) -> HttpRequest {
        let mut req = HttpRequest::new(HttpMethod::Get, self.users_url());
        req.query.push((field.as_str().to_string(), value.to_string()));
        req
    }

    pub fn build_update_user(&self, input: &UpdateUser, id: UserId) -> Result<HttpRequest, ClientError> {
        let mut req = HttpRequest::new(HttpMethod::Patch, self.user_url(id));
        attach_json(&mut req, input)?;
        Ok(req)
    }

    pub fn build_delete_user(&self, id: UserId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.user_url(id))
    }

    pub fn parse_user(&self, response: &HttpResponse) -> Result<User, ClientError> {
        decode(response)
    }

    /// Decode a page of users and report the upstream's pagination total.
    pub fn parse_users(&self, response: &HttpResponse) -> Result<Vec<User>, ClientError> {
        let total = response.header(PAGINATION_TOTAL_HEADER).unwrap_or("unknown");
        info!("Total Number of Pages: {total}");
        decode(response)
    }

    pub fn parse_search_users(&self, response: &HttpResponse) -> Result<Vec<User>, ClientError> {
        decode(response)
    }

    /// Any 2xx is success; the body is ignored.
    pub fn parse_delete_user(&self, _response: &HttpResponse) -> Result<bool, ClientError> {
        Ok(true)
    }
}

#[async_trait]
impl<T: Transport> UsersApi for GoRestClient<T> {
    async fn create_user(&self, input: &CreateUser) -> Result<User, ClientError> {
        let req = self.build_create_user(input)?;
        let response = self.execute(req).await?;
        self.parse_user(&response)
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, ClientError> {
        let response = self.execute(self.build_fetch_user(id)).await?;
        self.parse_user(&response)
    }

    async fn fetch_users(&self, page: u32) -> Result<Vec<User>, ClientError> {
        let response = self.execute(self.build_fetch_users(page)).await?;
        self.parse_users(&response)
    }

    async fn search_users(&self, field: SearchField, value: &str) -> Result<Vec<User>, ClientError> {
        let response = self.execute(self.build_search_users(field, value)).await?;
        self.parse_search_users(&response)
    }

    async fn update_user(&self, input: &UpdateUser, id: UserId) -> Result<User, ClientError> {
        let req = self.build_update_user(input, id)?;
        let response = self.execute(req).await?;
        self.parse_user(&response)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, ClientError> {
        let response = self.execute(self.build_delete_user(id)).await?;
        self.parse_delete_user(&response)
    }
}

fn attach_json<B: Serialize>(req: &mut HttpRequest, body: &B) -> Result<(), ClientError> {
    let body = serde_json::to_string(body).map_err(|e| {
        error!(error = %e, "request body could not be serialized");
        ClientError::internal()
    })?;
    req.set_header("content-type", "application/json".to_string());
    req.body = Some(body);
    Ok(())
}

/// A 2xx body that does not match the expected shape is reported the same
/// way as any other failure the upstream did not describe.
fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ClientError> {
    serde_json::from_str(&response.body).map_err(|e| {
        error!(status = response.status, error = %e, "upstream response body could not be decoded");
        ClientError::internal()
    })
}
