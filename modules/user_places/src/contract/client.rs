use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::PlacesError,
    model::{List, NewUser, Place, Rating, SyncOutcome, UserAggregate, UserPlace, WebhookHeaders},
};

/// Public API trait for the user_places module that other modules can use
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Create a user; returns the storage-assigned document id
    async fn create_user(&self, new_user: NewUser) -> Result<Uuid, PlacesError>;

    /// Get a user aggregate by logical id
    async fn get_user(&self, user_id: &str) -> Result<UserAggregate, PlacesError>;

    /// Delete a user aggregate by logical id
    async fn delete_user(&self, user_id: &str) -> Result<(), PlacesError>;

    /// Append a list; returns its id
    async fn create_list(&self, user_id: &str, list: List) -> Result<String, PlacesError>;

    async fn get_lists(&self, user_id: &str) -> Result<Vec<List>, PlacesError>;

    async fn get_list_by_name(&self, user_id: &str, name: &str) -> Result<List, PlacesError>;

    /// Remove every list with this name
    async fn delete_list_by_name(&self, user_id: &str, name: &str) -> Result<(), PlacesError>;

    async fn append_place(
        &self,
        user_id: &str,
        list_name: &str,
        place: Place,
    ) -> Result<(), PlacesError>;

    async fn remove_place(
        &self,
        user_id: &str,
        list_name: &str,
        osm_id: &str,
    ) -> Result<(), PlacesError>;

    async fn visit_place(&self, user_id: &str, place: UserPlace)
        -> Result<UserPlace, PlacesError>;

    async fn get_visited_place(&self, user_id: &str, osm_id: &str)
        -> Result<UserPlace, PlacesError>;

    async fn unvisit_place(&self, user_id: &str, osm_id: &str) -> Result<(), PlacesError>;

    async fn watch_place(&self, user_id: &str, place: UserPlace)
        -> Result<UserPlace, PlacesError>;

    async fn get_watched_place(&self, user_id: &str, osm_id: &str)
        -> Result<UserPlace, PlacesError>;

    async fn unwatch_place(&self, user_id: &str, osm_id: &str) -> Result<(), PlacesError>;

    /// Rate a place; returns the rated `osm_id`
    async fn rate_place(&self, user_id: &str, rating: Rating) -> Result<String, PlacesError>;

    async fn get_rating(&self, user_id: &str, osm_id: &str) -> Result<Rating, PlacesError>;

    async fn delete_rating(&self, user_id: &str, osm_id: &str) -> Result<(), PlacesError>;

    /// Verify and apply one identity-provider webhook delivery
    async fn handle_identity_webhook(
        &self,
        headers: WebhookHeaders,
        body: &[u8],
    ) -> Result<SyncOutcome, PlacesError>;
}
