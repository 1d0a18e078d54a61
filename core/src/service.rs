//! Business-facing users service.
//!
//! Delegates each operation to a `UsersApi` and re-wraps any `ClientError`
//! into a `ServiceError`. Two deliberate asymmetries are kept:
//! `search` does not log before wrapping, and `update` logs a failure and
//! returns `None` instead of an error.

use std::cmp::Ordering;

use tracing::error;

use crate::client::UsersApi;
use crate::error::ServiceError;
use crate::types::{CreateUser, SearchField, SortDirection, SortField, UpdateUser, User, UserId};

#[derive(Debug, Clone)]
pub struct UsersService<A> {
    api: A,
}

impl<A: UsersApi> UsersService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    pub async fn create(&self, input: &CreateUser) -> Result<User, ServiceError> {
        self.api.create_user(input).await.map_err(|e| {
            error!(error = %e, "create failed");
            ServiceError::from(e)
        })
    }

    pub async fn find_all_on_page(&self, page: u32) -> Result<Vec<User>, ServiceError> {
        self.api.fetch_users(page).await.map_err(|e| {
            error!(error = %e, page, "find_all_on_page failed");
            ServiceError::from(e)
        })
    }

    pub async fn find_one(&self, id: UserId) -> Result<User, ServiceError> {
        self.api.fetch_user(id).await.map_err(|e| {
            error!(error = %e, id, "find_one failed");
            ServiceError::from(e)
        })
    }

    /// Patch a user. A failure is logged and yields `None`; it is never
    /// returned as an error.
    pub async fn update(&self, id: UserId, input: &UpdateUser) -> Option<User> {
        match self.api.update_user(input, id).await {
            Ok(user) => Some(user),
            Err(e) => {
                error!(error = %e, id, "update failed");
                None
            }
        }
    }

    pub async fn remove(&self, id: UserId) -> Result<bool, ServiceError> {
        self.api.delete_user(id).await.map_err(|e| {
            error!(error = %e, id, "remove failed");
            ServiceError::from(e)
        })
    }

    pub async fn search(&self, field: SearchField, value: &str) -> Result<Vec<User>, ServiceError> {
        self.api
            .search_users(field, value)
            .await
            .map_err(ServiceError::from)
    }

    pub fn sort<'a>(
        &self,
        users: &'a mut [User],
        field: SortField,
        direction: SortDirection,
    ) -> &'a mut [User] {
        sort_users(users, field, direction)
    }
}

/// Borrowed view of the value a user is ordered by.
#[derive(Debug, PartialEq, PartialOrd)]
enum SortKey<'a> {
    Id(UserId),
    Text(&'a str),
}

fn sort_key(user: &User, field: SortField) -> SortKey<'_> {
    match field {
        SortField::Id => SortKey::Id(user.id),
        SortField::Name => SortKey::Text(&user.name),
        SortField::Email => SortKey::Text(&user.email),
        SortField::Gender => SortKey::Text(user.gender.as_str()),
        SortField::Status => SortKey::Text(user.status.as_str()),
    }
}

/// Sort `users` in place by `field` and return the same slice.
///
/// Equal keys keep no guaranteed relative order.
pub fn sort_users(users: &mut [User], field: SortField, direction: SortDirection) -> &mut [User] {
    match direction {
        SortDirection::Desc => users.sort_by(|a, b| {
            let (a, b) = (sort_key(a, field), sort_key(b, field));
            if a > b {
                Ordering::Less
            } else if a < b {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }),
        SortDirection::Asc => users.sort_by(|a, b| {
            let (a, b) = (sort_key(a, field), sort_key(b, field));
            if a < b {
                Ordering::Less
            } else if a > b {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }),
    }
    users
}
