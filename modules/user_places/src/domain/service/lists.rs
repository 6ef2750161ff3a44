use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{remove_by_key, require_key, Service};
use crate::contract::model::{List, Place};
use crate::domain::error::DomainError;

/// First list with this name; names are not unique.
fn find_list_mut<'a>(lists: &'a mut [List], name: &str) -> Option<&'a mut List> {
    lists.iter_mut().find(|l| l.list_name == name)
}

impl Service {
    #[instrument(
        name = "user_places.service.create_list",
        skip(self, list),
        fields(list_name = %list.list_name)
    )]
    pub async fn create_list(&self, user_id: &str, mut list: List) -> Result<String, DomainError> {
        info!("Creating list");
        require_key("list_name", &list.list_name)?;

        if list.id.is_empty() {
            list.id = Uuid::new_v4().to_string();
        }
        let list_id = list.id.clone();

        self.mutate(user_id, move |user| {
            user.lists.push(list);
            Ok(())
        })
        .await?;

        info!(list_id = %list_id, "Successfully created list");
        Ok(list_id)
    }

    #[instrument(name = "user_places.service.get_lists", skip(self))]
    pub async fn get_lists(&self, user_id: &str) -> Result<Vec<List>, DomainError> {
        let (user, _) = self.load(user_id).await?;
        debug!(count = user.lists.len(), "Loaded lists");
        Ok(user.lists)
    }

    #[instrument(name = "user_places.service.get_list_by_name", skip(self))]
    pub async fn get_list_by_name(&self, user_id: &str, name: &str) -> Result<List, DomainError> {
        let (user, _) = self.load(user_id).await?;
        user.lists
            .into_iter()
            .find(|l| l.list_name == name)
            .ok_or_else(|| DomainError::list_not_found(user_id, name))
    }

    /// Removes every list carrying `name`. The aggregate is written back
    /// even when no list matched.
    #[instrument(name = "user_places.service.delete_list_by_name", skip(self))]
    pub async fn delete_list_by_name(&self, user_id: &str, name: &str) -> Result<(), DomainError> {
        info!("Deleting lists by name");
        let removed = self
            .mutate(user_id, |user| {
                Ok(remove_by_key(&mut user.lists, name, |l| l.list_name.as_str()))
            })
            .await?;
        info!(removed, "Lists deleted");
        Ok(())
    }

    #[instrument(
        name = "user_places.service.append_place",
        skip(self, place),
        fields(osm_id = %place.osm_id)
    )]
    pub async fn append_place(
        &self,
        user_id: &str,
        list_name: &str,
        place: Place,
    ) -> Result<(), DomainError> {
        info!("Appending place to list");
        require_key("osm_id", &place.osm_id)?;

        self.mutate(user_id, |user| {
            let list = find_list_mut(&mut user.lists, list_name)
                .ok_or_else(|| DomainError::list_not_found(user_id, list_name))?;
            list.places.push(place);
            Ok(())
        })
        .await?;

        info!("Successfully appended place");
        Ok(())
    }

    #[instrument(name = "user_places.service.remove_place", skip(self))]
    pub async fn remove_place(
        &self,
        user_id: &str,
        list_name: &str,
        osm_id: &str,
    ) -> Result<(), DomainError> {
        info!("Removing place from list");

        self.mutate(user_id, |user| {
            let list = find_list_mut(&mut user.lists, list_name)
                .ok_or_else(|| DomainError::list_not_found(user_id, list_name))?;
            match remove_by_key(&mut list.places, osm_id, |p| p.osm_id.as_str()) {
                0 => Err(DomainError::place_not_found(list_name, osm_id)),
                _ => Ok(()),
            }
        })
        .await?;

        info!("Successfully removed place");
        Ok(())
    }
}
