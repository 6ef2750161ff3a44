use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("List '{list_name}' not found for user {user_id}")]
    ListNotFound { user_id: String, list_name: String },

    #[error("Place {osm_id} not found in list '{list_name}'")]
    PlaceNotFound { list_name: String, osm_id: String },

    #[error("Visited place {osm_id} not found for user {user_id}")]
    VisitedPlaceNotFound { user_id: String, osm_id: String },

    #[error("Watched place {osm_id} not found for user {user_id}")]
    WatchedPlaceNotFound { user_id: String, osm_id: String },

    #[error("Rating for {osm_id} not found for user {user_id}")]
    RatingNotFound { user_id: String, osm_id: String },

    #[error("User '{user_id}' already exists")]
    UserAlreadyExists { user_id: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("User '{user_id}' was modified concurrently")]
    Conflict { user_id: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },
}

impl DomainError {
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    pub fn list_not_found(user_id: impl Into<String>, list_name: impl Into<String>) -> Self {
        Self::ListNotFound {
            user_id: user_id.into(),
            list_name: list_name.into(),
        }
    }

    pub fn place_not_found(list_name: impl Into<String>, osm_id: impl Into<String>) -> Self {
        Self::PlaceNotFound {
            list_name: list_name.into(),
            osm_id: osm_id.into(),
        }
    }

    pub fn visited_place_not_found(user_id: impl Into<String>, osm_id: impl Into<String>) -> Self {
        Self::VisitedPlaceNotFound {
            user_id: user_id.into(),
            osm_id: osm_id.into(),
        }
    }

    pub fn watched_place_not_found(user_id: impl Into<String>, osm_id: impl Into<String>) -> Self {
        Self::WatchedPlaceNotFound {
            user_id: user_id.into(),
            osm_id: osm_id.into(),
        }
    }

    pub fn rating_not_found(user_id: impl Into<String>, osm_id: impl Into<String>) -> Self {
        Self::RatingNotFound {
            user_id: user_id.into(),
            osm_id: osm_id.into(),
        }
    }

    pub fn user_already_exists(user_id: impl Into<String>) -> Self {
        Self::UserAlreadyExists {
            user_id: user_id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn authentication_failed(reason: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            reason: reason.into(),
        }
    }

    pub fn conflict(user_id: impl Into<String>) -> Self {
        Self::Conflict {
            user_id: user_id.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }
}
