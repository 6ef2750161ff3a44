use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::contract::model::{UserAggregate, RATING_MAX, RATING_MIN};
use crate::domain::error::DomainError;
use crate::domain::repo::{AggregateStore, WriteHandle};

mod lists;
mod ratings;
mod user_places;
mod users;

pub use user_places::PlaceShelf;

/// Domain service with the read-modify-write rules for user aggregates.
/// Depends only on the store port, not on infra types.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn AggregateStore>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound for every single store call.
    pub store_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(store: Arc<dyn AggregateStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Run one store call under the configured timeout and map infra
    /// failures to `StorageUnavailable`.
    async fn call_store<T, F>(&self, operation: &'static str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!(operation, error = %format!("{e:#}"), "Store call failed");
                Err(DomainError::storage(format!("{operation}: {e:#}")))
            }
            Err(_) => {
                error!(operation, timeout = ?self.config.store_timeout, "Store call timed out");
                Err(DomainError::storage(format!(
                    "{operation} timed out after {:?}",
                    self.config.store_timeout
                )))
            }
        }
    }

    /// Load the aggregate plus the handle needed to write it back.
    async fn load(&self, user_id: &str) -> Result<(UserAggregate, WriteHandle), DomainError> {
        debug!(user_id, "Loading user aggregate");
        self.call_store("find", self.store.find(user_id))
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    /// Write the whole aggregate back over the version that was read.
    async fn save(
        &self,
        handle: &WriteHandle,
        user: &UserAggregate,
    ) -> Result<WriteHandle, DomainError> {
        match self.call_store("write", self.store.write(handle, user)).await? {
            Some(next) => Ok(next),
            None => {
                warn!(
                    user_id = %user.id,
                    version = handle.version,
                    "Stale write rejected: aggregate changed since it was read"
                );
                Err(DomainError::conflict(user.id.clone()))
            }
        }
    }

    /// Load, apply `mutation` to the in-memory copy, write back.
    ///
    /// Nothing is written when `mutation` fails.
    async fn mutate<T, M>(&self, user_id: &str, mutation: M) -> Result<T, DomainError>
    where
        M: FnOnce(&mut UserAggregate) -> Result<T, DomainError> + Send,
        T: Send,
    {
        let (mut user, handle) = self.load(user_id).await?;
        let out = mutation(&mut user)?;
        let next = self.save(&handle, &user).await?;
        debug!(user_id, version = next.version, "User aggregate written back");
        Ok(out)
    }
}

// --- validation helpers ---

fn require_key(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn validate_rating_value(field: &str, value: i8) -> Result<(), DomainError> {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(DomainError::validation(
            field,
            format!("{value} is outside {RATING_MIN}..={RATING_MAX}"),
        ));
    }
    Ok(())
}

/// Replace the first item whose key matches, dropping any later duplicates;
/// append when nothing matches.
fn upsert_by_key<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> &str) {
    let wanted = key(&item).to_owned();
    match items.iter().position(|existing| key(existing) == wanted) {
        Some(pos) => {
            let mut idx = 0;
            items.retain(|existing| {
                let keep = idx <= pos || key(existing) != wanted;
                idx += 1;
                keep
            });
            items[pos] = item;
        }
        None => items.push(item),
    }
}

/// Remove every item whose key matches. Returns how many were removed.
fn remove_by_key<T>(items: &mut Vec<T>, wanted: &str, key: impl Fn(&T) -> &str) -> usize {
    let before = items.len();
    items.retain(|existing| key(existing) != wanted);
    before - items.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, u8);

    fn key(i: &Item) -> &str {
        i.0
    }

    #[test]
    fn upsert_appends_new_keys() {
        let mut items = vec![Item("a", 1)];
        upsert_by_key(&mut items, Item("b", 2), key);
        assert_eq!(items, vec![Item("a", 1), Item("b", 2)]);
    }

    #[test]
    fn upsert_replaces_in_place_and_collapses_duplicates() {
        let mut items = vec![Item("x", 0), Item("a", 1), Item("b", 2), Item("a", 3)];
        upsert_by_key(&mut items, Item("a", 9), key);
        assert_eq!(items, vec![Item("x", 0), Item("a", 9), Item("b", 2)]);
    }

    #[test]
    fn remove_counts_every_match() {
        let mut items = vec![Item("a", 1), Item("b", 2), Item("a", 3)];
        assert_eq!(remove_by_key(&mut items, "a", key), 2);
        assert_eq!(items, vec![Item("b", 2)]);
        assert_eq!(remove_by_key(&mut items, "zzz", key), 0);
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating_value("rating", RATING_MIN).is_ok());
        assert!(validate_rating_value("rating", RATING_MAX).is_ok());
        assert!(validate_rating_value("rating", RATING_MAX + 1).is_err());
        assert!(validate_rating_value("rating", RATING_MIN - 1).is_err());
    }

    #[test]
    fn blank_keys_are_rejected() {
        assert!(require_key("osm_id", "").is_err());
        assert!(require_key("osm_id", "   ").is_err());
        assert!(require_key("osm_id", "42").is_ok());
    }
}
