use tracing::{info, instrument};

use super::{remove_by_key, require_key, upsert_by_key, validate_rating_value, Service};
use crate::contract::model::{UserAggregate, UserPlace};
use crate::domain::error::DomainError;

/// Which per-user place collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceShelf {
    Visited,
    Watched,
}

impl PlaceShelf {
    fn places(self, user: &UserAggregate) -> &[UserPlace] {
        match self {
            Self::Visited => &user.visited_places,
            Self::Watched => &user.watched_places,
        }
    }

    fn places_mut(self, user: &mut UserAggregate) -> &mut Vec<UserPlace> {
        match self {
            Self::Visited => &mut user.visited_places,
            Self::Watched => &mut user.watched_places,
        }
    }

    fn not_found(self, user_id: &str, osm_id: &str) -> DomainError {
        match self {
            Self::Visited => DomainError::visited_place_not_found(user_id, osm_id),
            Self::Watched => DomainError::watched_place_not_found(user_id, osm_id),
        }
    }
}

impl Service {
    pub async fn visit_place(
        &self,
        user_id: &str,
        place: UserPlace,
    ) -> Result<UserPlace, DomainError> {
        self.shelve_place(PlaceShelf::Visited, user_id, place).await
    }

    pub async fn watch_place(
        &self,
        user_id: &str,
        place: UserPlace,
    ) -> Result<UserPlace, DomainError> {
        self.shelve_place(PlaceShelf::Watched, user_id, place).await
    }

    pub async fn get_visited_place(
        &self,
        user_id: &str,
        osm_id: &str,
    ) -> Result<UserPlace, DomainError> {
        self.shelved_place(PlaceShelf::Visited, user_id, osm_id).await
    }

    pub async fn get_watched_place(
        &self,
        user_id: &str,
        osm_id: &str,
    ) -> Result<UserPlace, DomainError> {
        self.shelved_place(PlaceShelf::Watched, user_id, osm_id).await
    }

    pub async fn unvisit_place(&self, user_id: &str, osm_id: &str) -> Result<(), DomainError> {
        self.unshelve_place(PlaceShelf::Visited, user_id, osm_id).await
    }

    pub async fn unwatch_place(&self, user_id: &str, osm_id: &str) -> Result<(), DomainError> {
        self.unshelve_place(PlaceShelf::Watched, user_id, osm_id).await
    }

    /// Upsert `place` into the shelf, keyed by `osm_id`.
    #[instrument(
        name = "user_places.service.shelve_place",
        skip(self, place),
        fields(osm_id = %place.osm_id)
    )]
    pub async fn shelve_place(
        &self,
        shelf: PlaceShelf,
        user_id: &str,
        place: UserPlace,
    ) -> Result<UserPlace, DomainError> {
        info!("Recording place");
        require_key("osmID", &place.osm_id)?;
        if let Some(rating) = place.rating {
            validate_rating_value("rating", rating)?;
        }

        let stored = place.clone();
        self.mutate(user_id, move |user| {
            upsert_by_key(shelf.places_mut(user), place, |p| p.osm_id.as_str());
            Ok(())
        })
        .await?;

        info!("Successfully recorded place");
        Ok(stored)
    }

    #[instrument(name = "user_places.service.shelved_place", skip(self))]
    pub async fn shelved_place(
        &self,
        shelf: PlaceShelf,
        user_id: &str,
        osm_id: &str,
    ) -> Result<UserPlace, DomainError> {
        let (user, _) = self.load(user_id).await?;
        shelf
            .places(&user)
            .iter()
            .find(|p| p.osm_id == osm_id)
            .cloned()
            .ok_or_else(|| shelf.not_found(user_id, osm_id))
    }

    #[instrument(name = "user_places.service.unshelve_place", skip(self))]
    pub async fn unshelve_place(
        &self,
        shelf: PlaceShelf,
        user_id: &str,
        osm_id: &str,
    ) -> Result<(), DomainError> {
        info!("Removing place record");
        self.mutate(user_id, |user| {
            match remove_by_key(shelf.places_mut(user), osm_id, |p| p.osm_id.as_str()) {
                0 => Err(shelf.not_found(user_id, osm_id)),
                _ => Ok(()),
            }
        })
        .await
    }
}
