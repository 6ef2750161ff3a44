use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::PlacesApi,
    error::PlacesError,
    model::{List, NewUser, Place, Rating, SyncOutcome, UserAggregate, UserPlace, WebhookHeaders},
};
use crate::domain::identity::IdentitySync;
use crate::domain::service::Service;

/// Local implementation of the PlacesApi trait that delegates to the domain service
pub struct PlacesLocalClient {
    service: Arc<Service>,
    identity: Arc<IdentitySync>,
}

impl PlacesLocalClient {
    pub fn new(service: Arc<Service>, identity: Arc<IdentitySync>) -> Self {
        Self { service, identity }
    }
}

#[async_trait]
impl PlacesApi for PlacesLocalClient {
    async fn create_user(&self, new_user: NewUser) -> Result<Uuid, PlacesError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn get_user(&self, user_id: &str) -> Result<UserAggregate, PlacesError> {
        self.service.get_user(user_id).await.map_err(Into::into)
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), PlacesError> {
        self.service.delete_user(user_id).await.map_err(Into::into)
    }

    async fn create_list(&self, user_id: &str, list: List) -> Result<String, PlacesError> {
        self.service
            .create_list(user_id, list)
            .await
            .map_err(Into::into)
    }

    async fn get_lists(&self, user_id: &str) -> Result<Vec<List>, PlacesError> {
        self.service.get_lists(user_id).await.map_err(Into::into)
    }

    async fn get_list_by_name(&self, user_id: &str, name: &str) -> Result<List, PlacesError> {
        self.service
            .get_list_by_name(user_id, name)
            .await
            .map_err(Into::into)
    }

    async fn delete_list_by_name(&self, user_id: &str, name: &str) -> Result<(), PlacesError> {
        self.service
            .delete_list_by_name(user_id, name)
            .await
            .map_err(Into::into)
    }

    async fn append_place(
        &self,
        user_id: &str,
        list_name: &str,
        place: Place,
    ) -> Result<(), PlacesError> {
        self.service
            .append_place(user_id, list_name, place)
            .await
            .map_err(Into::into)
    }

    async fn remove_place(
        &self,
        user_id: &str,
        list_name: &str,
        osm_id: &str,
    ) -> Result<(), PlacesError> {
        self.service
            .remove_place(user_id, list_name, osm_id)
            .await
            .map_err(Into::into)
    }

    async fn visit_place(
        &self,
        user_id: &str,
        place: UserPlace,
    ) -> Result<UserPlace, PlacesError> {
        self.service
            .visit_place(user_id, place)
            .await
            .map_err(Into::into)
    }

    async fn get_visited_place(
        &self,
        user_id: &str,
        osm_id: &str,
    ) -> Result<UserPlace, PlacesError> {
        self.service
            .get_visited_place(user_id, osm_id)
            .await
            .map_err(Into::into)
    }

    async fn unvisit_place(&self, user_id: &str, osm_id: &str) -> Result<(), PlacesError> {
        self.service
            .unvisit_place(user_id, osm_id)
            .await
            .map_err(Into::into)
    }

    async fn watch_place(
        &self,
        user_id: &str,
        place: UserPlace,
    ) -> Result<UserPlace, PlacesError> {
        self.service
            .watch_place(user_id, place)
            .await
            .map_err(Into::into)
    }

    async fn get_watched_place(
        &self,
        user_id: &str,
        osm_id: &str,
    ) -> Result<UserPlace, PlacesError> {
        self.service
            .get_watched_place(user_id, osm_id)
            .await
            .map_err(Into::into)
    }

    async fn unwatch_place(&self, user_id: &str, osm_id: &str) -> Result<(), PlacesError> {
        self.service
            .unwatch_place(user_id, osm_id)
            .await
            .map_err(Into::into)
    }

    async fn rate_place(&self, user_id: &str, rating: Rating) -> Result<String, PlacesError> {
        self.service
            .rate_place(user_id, rating)
            .await
            .map_err(Into::into)
    }

    async fn get_rating(&self, user_id: &str, osm_id: &str) -> Result<Rating, PlacesError> {
        self.service
            .get_rating(user_id, osm_id)
            .await
            .map_err(Into::into)
    }

    async fn delete_rating(&self, user_id: &str, osm_id: &str) -> Result<(), PlacesError> {
        self.service
            .delete_rating(user_id, osm_id)
            .await
            .map_err(Into::into)
    }

    async fn handle_identity_webhook(
        &self,
        headers: WebhookHeaders,
        body: &[u8],
    ) -> Result<SyncOutcome, PlacesError> {
        self.identity
            .handle_delivery(&headers, body)
            .await
            .map_err(Into::into)
    }
}
