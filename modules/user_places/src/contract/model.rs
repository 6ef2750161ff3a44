use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted rating value ("avoid").
pub const RATING_MIN: i8 = -2;
/// Highest accepted rating value ("favourite").
pub const RATING_MAX: i8 = 2;

/// Complete per-user document. Stored and loaded as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAggregate {
    /// Logical id issued by the identity provider.
    pub id: String,
    #[serde(rename = "createdOn")]
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default, rename = "visitedPlaces")]
    pub visited_places: Vec<UserPlace>,
    #[serde(default, rename = "watchedPlaces")]
    pub watched_places: Vec<UserPlace>,
    #[serde(default, rename = "ratedPlaces")]
    pub rated_places: Vec<Rating>,
}

impl UserAggregate {
    /// Fresh aggregate with every sub-collection empty.
    pub fn empty(id: impl Into<String>, created_on: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_on,
            lists: Vec::new(),
            visited_places: Vec::new(),
            watched_places: Vec::new(),
            rated_places: Vec::new(),
        }
    }
}

/// Data for creating a user. Only the logical id is meaningful; the
/// creation time and all collections are assigned on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub id: String,
}

/// Named collection of places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub id: String,
    pub list_name: String,
    #[serde(default)]
    pub places: Vec<Place>,
}

impl List {
    /// List with no id yet; one is generated on create.
    pub fn named(list_name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            list_name: list_name.into(),
            places: Vec::new(),
        }
    }
}

/// A geocoded place, identified by its OSM id and kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub osm_id: String,
    pub osm_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
}

/// Visited or watched record, keyed by `osm_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPlace {
    #[serde(rename = "osmID")]
    pub osm_id: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub rating: Option<i8>,
    #[serde(default, rename = "visitedAt")]
    pub visited_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "ratedAt")]
    pub rated_at: Option<DateTime<Utc>>,
}

/// Rating of a place, keyed by `osm_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "osmID")]
    pub osm_id: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub rating: i8,
}

/// Outcome of processing one identity-provider webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new aggregate was stored under this physical id.
    Created { user_id: String, document_id: Uuid },
    /// Redelivered creation; the aggregate already existed.
    AlreadyPresent { user_id: String },
    Deleted { user_id: String },
    /// Redelivered deletion; nothing was left to remove.
    AlreadyAbsent { user_id: String },
    /// Event type this service does not react to.
    Ignored { event_type: String },
}

/// Delivery metadata that accompanies a signed webhook body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebhookHeaders {
    pub message_id: String,
    pub timestamp: String,
    pub signature: String,
}
