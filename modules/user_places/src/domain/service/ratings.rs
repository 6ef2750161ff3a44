use tracing::{info, instrument};

use super::{remove_by_key, require_key, upsert_by_key, validate_rating_value, Service};
use crate::contract::model::Rating;
use crate::domain::error::DomainError;

impl Service {
    /// Record a rating, replacing any earlier rating of the same place.
    #[instrument(
        name = "user_places.service.rate_place",
        skip(self, rating),
        fields(osm_id = %rating.osm_id, value = rating.rating)
    )]
    pub async fn rate_place(&self, user_id: &str, rating: Rating) -> Result<String, DomainError> {
        info!("Rating place");
        require_key("osmID", &rating.osm_id)?;
        validate_rating_value("rating", rating.rating)?;

        let osm_id = rating.osm_id.clone();
        self.mutate(user_id, move |user| {
            upsert_by_key(&mut user.rated_places, rating, |r| r.osm_id.as_str());
            Ok(())
        })
        .await?;

        info!("Successfully rated place");
        Ok(osm_id)
    }

    #[instrument(name = "user_places.service.get_rating", skip(self))]
    pub async fn get_rating(&self, user_id: &str, osm_id: &str) -> Result<Rating, DomainError> {
        let (user, _) = self.load(user_id).await?;
        user.rated_places
            .into_iter()
            .find(|r| r.osm_id == osm_id)
            .ok_or_else(|| DomainError::rating_not_found(user_id, osm_id))
    }

    #[instrument(name = "user_places.service.delete_rating", skip(self))]
    pub async fn delete_rating(&self, user_id: &str, osm_id: &str) -> Result<(), DomainError> {
        info!("Deleting rating");
        self.mutate(user_id, |user| {
            match remove_by_key(&mut user.rated_places, osm_id, |r| r.osm_id.as_str()) {
                0 => Err(DomainError::rating_not_found(user_id, osm_id)),
                _ => Ok(()),
            }
        })
        .await
    }
}
