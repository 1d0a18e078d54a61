//! Domain DTOs for the upstream users API.
//!
//! # Design
//! These types mirror the upstream `/users` schema but are defined
//! independently from the mock-server crate. Integration tests catch any
//! schema drift between the two. Enum values serialize to the lowercase
//! strings the upstream uses on the wire.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the upstream on creation.
pub type UserId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

/// A single user record returned by the upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: Status,
}

/// Request payload for creating a new user. The upstream assigns `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: Status,
}

/// Request payload for patching an existing user. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Name-only patch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserName {
    pub name: String,
}

impl From<UpdateUserName> for UpdateUser {
    fn from(patch: UpdateUserName) -> Self {
        UpdateUser {
            name: Some(patch.name),
            ..UpdateUser::default()
        }
    }
}

/// Re-sends every mutable field of a fetched user. `id` travels in the path.
impl From<User> for UpdateUser {
    fn from(user: User) -> Self {
        UpdateUser {
            name: Some(user.name),
            email: Some(user.email),
            gender: Some(user.gender),
            status: Some(user.status),
        }
    }
}

/// Field used as the query parameter name when searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Email,
    Gender,
    Status,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Email => "email",
            SearchField::Gender => "gender",
            SearchField::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Email,
    Gender,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl FromStr for SortField {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "gender" => Ok(SortField::Gender),
            "status" => Ok(SortField::Status),
            other => Err(ParseEnumError {
                kind: "sort field",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ParseEnumError {
                kind: "sort direction",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for SearchField {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchField::Name),
            "email" => Ok(SearchField::Email),
            "gender" => Ok(SearchField::Gender),
            "status" => Ok(SearchField::Status),
            other => Err(ParseEnumError {
                kind: "search field",
                value: other.to_string(),
            }),
        }
    }
}
