//! Client and service layer for a remote users REST API.
//!
//! # Overview
//! `GoRestClient` translates six operations (create, fetch one, fetch a page,
//! search, patch, delete) into HTTP requests against `{base_url}/users`,
//! attaches a static bearer token, and normalizes every failure into a
//! `ClientError`. `UsersService` sits on top, re-wraps failures as
//! `ServiceError`, and provides an in-memory `sort`.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   only a `Transport` touches the network.
//! - Auth and error normalization live in one place, `Interceptor`, composed
//!   around every call.
//! - `UsersService` takes any `UsersApi`, so tests can substitute a fake.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod service;
#[cfg(test)]
mod test_support;
pub mod transport;
pub mod types;

pub use client::{GoRestClient, UsersApi, DEFAULT_PAGE, PAGINATION_TOTAL_HEADER};
pub use config::{ConfigError, GoRestConfig};
pub use error::{ClientError, ServiceError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use interceptor::{Interceptor, Transport};
pub use service::{sort_users, UsersService};
pub use transport::ReqwestTransport;
pub use types::{
    CreateUser, Gender, SearchField, SortDirection, SortField, Status, UpdateUser, UpdateUserName,
    User, UserId,
};
