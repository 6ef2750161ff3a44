#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use user_places::config::UserPlacesConfig;
use user_places::contract::model::{NewUser, Place, UserPlace, WebhookHeaders};
use user_places::domain::repo::AggregateStore;
use user_places::domain::service::{Service, ServiceConfig};
use user_places::infra::storage::InMemoryAggregateStore;
use user_places::infra::webhook::HmacWebhookVerifier;

pub const WEBHOOK_SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

/// Build the domain Service over a fresh in-memory store.
pub fn memory_service() -> (Arc<InMemoryAggregateStore>, Service) {
    let store = Arc::new(InMemoryAggregateStore::new());
    let service = Service::new(store.clone(), ServiceConfig::default());
    (store, service)
}

pub fn service_over(store: Arc<dyn AggregateStore>) -> Service {
    Service::new(store, ServiceConfig::default())
}

pub fn test_config() -> UserPlacesConfig {
    UserPlacesConfig {
        webhook_secret: Some(WEBHOOK_SECRET.to_string()),
        ..UserPlacesConfig::default()
    }
}

pub fn verifier() -> HmacWebhookVerifier {
    HmacWebhookVerifier::new(WEBHOOK_SECRET, Duration::from_secs(300))
        .expect("test secret is valid base64")
}

/// Headers the identity provider would send for `body` right now.
pub fn sign(message_id: &str, body: &[u8]) -> WebhookHeaders {
    let timestamp = Utc::now().timestamp().to_string();
    WebhookHeaders {
        message_id: message_id.to_string(),
        signature: verifier()
            .sign(message_id, &timestamp, body)
            .expect("signing works with a valid secret"),
        timestamp,
    }
}

pub fn created_event(user_id: &str, created_at_ms: i64) -> Vec<u8> {
    serde_json::json!({
        "type": "user.created",
        "object": "event",
        "data": {
            "id": user_id,
            "created_at": created_at_ms,
            "updated_at": created_at_ms,
            "email_addresses": [
                {
                    "id": "idn_1",
                    "email_address": "someone@example.org",
                    "verification": {"status": "verified"}
                }
            ],
            "first_name": "Some",
            "last_name": "One",
            "username": null,
            "image_url": "https://img.example.org/u.png",
            "external_accounts": []
        }
    })
    .to_string()
    .into_bytes()
}

pub fn deleted_event(user_id: &str) -> Vec<u8> {
    serde_json::json!({
        "type": "user.deleted",
        "object": "event",
        "data": {"id": user_id, "deleted": true, "object": "user"}
    })
    .to_string()
    .into_bytes()
}

pub fn new_user(id: &str) -> NewUser {
    NewUser { id: id.to_string() }
}

pub fn place(osm_id: &str) -> Place {
    Place {
        osm_id: osm_id.to_string(),
        osm_type: "restaurant".to_string(),
        lat: Some(40.4237),
        long: Some(-86.9212),
    }
}

pub fn user_place(osm_id: &str, rating: Option<i8>) -> UserPlace {
    UserPlace {
        osm_id: osm_id.to_string(),
        tags: ["cozy".to_string()].into_iter().collect(),
        rating,
        visited_at: Some(Utc::now()),
        rated_at: rating.map(|_| Utc::now()),
    }
}
