use std::{
    collections::BTreeMap,
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const PAGE_SIZE: usize = 10;
pub const PAGINATION_TOTAL_HEADER: &str = "x-pagination-total";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: Status,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: Status,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub status: Option<Status>,
}

#[derive(Deserialize, Default)]
pub struct ListParams {
    pub page: Option<usize>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
}

/// One entry of a 422 body, in the upstream's shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    users: BTreeMap<u64, User>,
}

impl Store {
    pub fn insert(&mut self, input: CreateUser) -> User {
        self.next_id += 1;
        let user = User {
            id: self.next_id,
            name: input.name,
            email: input.email,
            gender: input.gender,
            status: input.status,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    fn email_taken(&self, email: &str, except: Option<u64>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<RwLock<Store>>,
    pub token: Arc<str>,
}

pub fn app(token: &str) -> Router {
    app_with_store(token, Store::default())
}

/// Build the router around a pre-populated store.
pub fn app_with_store(token: &str, store: Store) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(store)),
        token: Arc::from(token),
    };
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).patch(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        tracing::warn!(uri = %request.uri(), "rejecting request without a valid bearer token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "Authentication failed" })),
        )
            .into_response();
    }
    next.run(request).await
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(user: &User, params: &ListParams) -> bool {
    let gender = serde_json::to_value(user.gender).unwrap_or_default();
    let status = serde_json::to_value(user.status).unwrap_or_default();
    params.name.as_deref().is_none_or(|n| contains_ci(&user.name, n))
        && params.email.as_deref().is_none_or(|e| contains_ci(&user.email, e))
        && params
            .gender
            .as_deref()
            .is_none_or(|g| gender.as_str() == Some(g))
        && params
            .status
            .as_deref()
            .is_none_or(|s| status.as_str() == Some(s))
}

async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> (HeaderMap, Json<Vec<User>>) {
    let store = state.db.read().await;
    let matching: Vec<&User> = store.users.values().filter(|u| matches(u, &params)).collect();

    let pages = matching.len().div_ceil(PAGE_SIZE);
    // Pages 0 and 1 both address the first page.
    let page = params.page.unwrap_or(1).max(1);
    let users = matching
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    let mut headers = HeaderMap::new();
    headers.insert(PAGINATION_TOTAL_HEADER, HeaderValue::from(pages));
    (headers, Json(users))
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), (StatusCode, Json<Vec<FieldError>>)> {
    let mut store = state.db.write().await;
    if store.email_taken(&input.email, None) {
        return Err(email_taken());
    }
    Ok((StatusCode::CREATED, Json(store.insert(input))))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    let store = state.db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, Response> {
    let mut store = state.db.write().await;
    let conflict = input
        .email
        .as_deref()
        .is_some_and(|email| store.email_taken(email, Some(id)));
    // An unknown id is reported before an email conflict.
    let user = store
        .users
        .get_mut(&id)
        .ok_or_else(|| StatusCode::NOT_FOUND.into_response())?;
    if conflict {
        return Err(email_taken().into_response());
    }
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(gender) = input.gender {
        user.gender = gender;
    }
    if let Some(status) = input.status {
        user.status = status;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = state.db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

fn email_taken() -> (StatusCode, Json<Vec<FieldError>>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(vec![FieldError {
            field: "email".to_string(),
            message: "has already been taken".to_string(),
        }]),
    )
}
