use thiserror::Error;

/// Errors that are safe to expose to callers of the contract API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacesError {
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    #[error("User '{user_id}' already exists")]
    AlreadyExists { user_id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("User '{user_id}' was modified concurrently")]
    Conflict { user_id: String },

    #[error("Storage unavailable")]
    Unavailable,

    #[error("Internal error")]
    Internal,
}

impl PlacesError {
    pub fn not_found(resource: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            key: key.into(),
        }
    }

    pub fn already_exists(user_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            user_id: user_id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn conflict(user_id: impl Into<String>) -> Self {
        Self::Conflict {
            user_id: user_id.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for PlacesError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { user_id } => Self::not_found("User", user_id),
            ListNotFound { list_name, .. } => Self::not_found("List", list_name),
            PlaceNotFound { osm_id, .. } => Self::not_found("Place", osm_id),
            VisitedPlaceNotFound { osm_id, .. } => Self::not_found("Visited place", osm_id),
            WatchedPlaceNotFound { osm_id, .. } => Self::not_found("Watched place", osm_id),
            RatingNotFound { osm_id, .. } => Self::not_found("Rating", osm_id),
            UserAlreadyExists { user_id } => Self::already_exists(user_id),
            Validation { field, message } => Self::validation(format!("{}: {}", field, message)),
            AuthenticationFailed { reason } => Self::unauthenticated(reason),
            Conflict { user_id } => Self::conflict(user_id),
            StorageUnavailable { .. } => Self::Unavailable,
        }
    }
}
