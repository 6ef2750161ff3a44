//! Identity-provider events, as far as this service cares about them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::error::DomainError;

pub const USER_CREATED: &str = "user.created";
pub const USER_DELETED: &str = "user.deleted";

/// Envelope every delivery arrives in: `{"type": ..., "data": {...}}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Account payload attached to `user.created`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailAddress {
    #[serde(default)]
    pub id: String,
    pub email_address: String,
}

impl IdentityUser {
    /// Account creation time, if the provider sent a usable one.
    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(DateTime::from_timestamp_millis)
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses
            .first()
            .map(|e| e.email_address.as_str())
    }
}

/// `user.deleted` only carries the id (and a `deleted` flag we ignore).
#[derive(Debug, Deserialize)]
struct DeletedUser {
    #[serde(default)]
    id: Option<String>,
}

/// Transport-agnostic identity event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    UserCreated(IdentityUser),
    UserDeleted { user_id: String },
    /// Any other event type; acknowledged without effect.
    Other { event_type: String },
}

impl IdentityEvent {
    /// Parse an already-verified delivery body.
    pub fn parse(body: &[u8]) -> Result<Self, DomainError> {
        let envelope: Envelope = serde_json::from_slice(body)
            .map_err(|e| DomainError::validation("body", format!("invalid JSON payload: {e}")))?;

        match envelope.event_type.as_str() {
            USER_CREATED => {
                let user: IdentityUser = serde_json::from_value(envelope.data)
                    .map_err(|e| DomainError::validation("data", e.to_string()))?;
                if user.id.trim().is_empty() {
                    return Err(DomainError::validation("data.id", "must not be empty"));
                }
                Ok(Self::UserCreated(user))
            }
            USER_DELETED => {
                let deleted: DeletedUser = serde_json::from_value(envelope.data)
                    .map_err(|e| DomainError::validation("data", e.to_string()))?;
                match deleted.id {
                    Some(user_id) if !user_id.trim().is_empty() => {
                        Ok(Self::UserDeleted { user_id })
                    }
                    _ => Err(DomainError::validation("data.id", "must not be empty")),
                }
            }
            _ => Ok(Self::Other {
                event_type: envelope.event_type,
            }),
        }
    }
}
