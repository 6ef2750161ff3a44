//! Identity lifecycle: signed provider deliveries create and remove user aggregates.

mod common;

use std::sync::Arc;

use anyhow::Result;
use chrono::DateTime;
use user_places::contract::model::{List, SyncOutcome, WebhookHeaders};
use user_places::domain::error::DomainError;
use user_places::domain::events::IdentityEvent;
use user_places::domain::identity::IdentitySync;
use user_places::infra::storage::InMemoryAggregateStore;

use common::{created_event, deleted_event, memory_service, sign, verifier};

fn sync() -> (Arc<InMemoryAggregateStore>, IdentitySync) {
    let (store, service) = memory_service();
    (store, IdentitySync::new(service, Arc::new(verifier())))
}

#[tokio::test]
async fn created_event_provisions_once_even_when_redelivered() -> Result<()> {
    let (store, sync) = sync();
    let body = created_event("user_1", 1_700_000_000_123);
    let headers = sign("msg_1", &body);

    let first = sync.handle_delivery(&headers, &body).await?;
    let SyncOutcome::Created { user_id, .. } = &first else {
        panic!("expected Created, got {first:?}");
    };
    assert_eq!(user_id, "user_1");

    let second = sync.handle_delivery(&headers, &body).await?;
    assert_eq!(
        second,
        SyncOutcome::AlreadyPresent {
            user_id: "user_1".to_string()
        }
    );
    assert_eq!(store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn created_on_comes_from_event_timestamp() -> Result<()> {
    let (_store, service) = memory_service();
    let sync = IdentitySync::new(service.clone(), Arc::new(verifier()));

    let body = created_event("user_1", 1_700_000_000_123);
    sync.handle_delivery(&sign("msg_1", &body), &body).await?;

    let IdentityEvent::UserCreated(event_user) = IdentityEvent::parse(&body)? else {
        panic!("fixture is a user.created event");
    };
    let stored = service.get_user("user_1").await?;
    assert_eq!(Some(stored.created_on), event_user.created_on());
    assert_eq!(
        Some(stored.created_on),
        DateTime::from_timestamp_millis(1_700_000_000_123)
    );
    assert!(stored.lists.is_empty());
    assert!(stored.visited_places.is_empty());
    Ok(())
}

#[tokio::test]
async fn redelivered_creation_keeps_existing_state() -> Result<()> {
    let (store, service) = memory_service();
    let sync = IdentitySync::new(service.clone(), Arc::new(verifier()));

    let body = created_event("user_1", 1_700_000_000_000);
    sync.handle_delivery(&sign("msg_1", &body), &body).await?;
    service.create_list("user_1", List::named("Favorites")).await?;

    sync.handle_delivery(&sign("msg_1", &body), &body).await?;

    let user = service.get_user("user_1").await?;
    assert_eq!(user.lists.len(), 1);
    assert_eq!(
        Some(user.created_on),
        DateTime::from_timestamp_millis(1_700_000_000_000)
    );
    assert_eq!(store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleted_event_removes_and_redelivery_succeeds() -> Result<()> {
    let (store, sync) = sync();
    let created = created_event("user_1", 1_700_000_000_000);
    sync.handle_delivery(&sign("msg_1", &created), &created).await?;

    let body = deleted_event("user_1");
    let headers = sign("msg_2", &body);

    assert_eq!(
        sync.handle_delivery(&headers, &body).await?,
        SyncOutcome::Deleted {
            user_id: "user_1".to_string()
        }
    );
    assert!(store.is_empty());

    assert_eq!(
        sync.handle_delivery(&headers, &body).await?,
        SyncOutcome::AlreadyAbsent {
            user_id: "user_1".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn bad_signature_changes_nothing() {
    let (store, sync) = sync();
    let body = created_event("user_1", 1_700_000_000_000);

    let mut headers = sign("msg_1", &body);
    headers.signature = "v1,bm90IHRoZSByaWdodCBzaWduYXR1cmU=".to_string();
    let err = sync.handle_delivery(&headers, &body).await.unwrap_err();
    assert!(matches!(err, DomainError::AuthenticationFailed { .. }));

    let err = sync
        .handle_delivery(&WebhookHeaders::default(), &body)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthenticationFailed { .. }));

    assert!(store.is_empty());
}

#[tokio::test]
async fn tampered_body_is_rejected() {
    let (store, sync) = sync();
    let body = created_event("user_1", 1_700_000_000_000);
    let headers = sign("msg_1", &body);

    let forged = created_event("user_2", 1_700_000_000_000);
    let err = sync.handle_delivery(&headers, &forged).await.unwrap_err();
    assert!(matches!(err, DomainError::AuthenticationFailed { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn unknown_event_type_is_ignored() -> Result<()> {
    let (store, sync) = sync();
    let body = br#"{"type":"session.created","data":{"id":"sess_1"}}"#;

    let outcome = sync.handle_delivery(&sign("msg_1", body), body).await?;
    assert_eq!(
        outcome,
        SyncOutcome::Ignored {
            event_type: "session.created".to_string()
        }
    );
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_payload_is_a_validation_error() {
    let (store, sync) = sync();

    let body = b"{not json";
    let err = sync
        .handle_delivery(&sign("msg_1", body), body)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let body = br#"{"type":"user.deleted","data":{"deleted":true}}"#;
    let err = sync
        .handle_delivery(&sign("msg_2", body), body)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    assert!(store.is_empty());
}

#[tokio::test]
async fn creation_without_timestamp_uses_current_time() -> Result<()> {
    let (_store, service) = memory_service();
    let sync = IdentitySync::new(service.clone(), Arc::new(verifier()));
    let body = br#"{"type":"user.created","data":{"id":"user_9"}}"#;

    let before = chrono::Utc::now();
    sync.handle_delivery(&sign("msg_1", body), body).await?;

    let user = service.get_user("user_9").await?;
    assert!(user.created_on >= before - chrono::Duration::seconds(1));
    Ok(())
}
