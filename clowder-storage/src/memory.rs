//! In-memory storage implementation for development and testing

use async_trait::async_trait;
use clowder_core::{Cat, User};
use clowder_geo::{filter_by_box, BoundingBox};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::{CatStorage, StorageError, UserStorage};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    cats: RwLock<HashMap<Uuid, Cat>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            cats: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// All cats in insertion-time order. Both `list` and the pushdown
    /// path go through this so their orderings agree.
    fn all_cats(&self) -> Vec<Cat> {
        let cats = self.cats.read().unwrap();
        let mut all: Vec<_> = cats.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        all
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatStorage for InMemoryStorage {
    async fn save(&self, cat: Cat) -> Result<Cat, StorageError> {
        let mut cats = self.cats.write().unwrap();
        cats.insert(cat.id, cat.clone());
        Ok(cat)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Cat>, StorageError> {
        let cats = self.cats.read().unwrap();
        Ok(cats.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Cat>, StorageError> {
        Ok(self.all_cats())
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Cat>, StorageError> {
        Ok(self
            .all_cats()
            .into_iter()
            .filter(|c| c.owner == owner)
            .collect())
    }

    async fn find_in_box(&self, bbox: &BoundingBox) -> Result<Vec<Cat>, StorageError> {
        // "Pushdown" here is the engine predicate applied at the storage
        // layer; a real backend would translate the same closed-box test
        // into a geo query.
        let cats = filter_by_box(self.all_cats(), bbox)
            .map_err(|e| StorageError::InvalidQuery(e.to_string()))?;
        tracing::debug!("Bounding-box query matched {} cats", cats.len());
        Ok(cats)
    }

    async fn update(&self, cat: Cat) -> Result<Cat, StorageError> {
        let mut cats = self.cats.write().unwrap();
        if cats.contains_key(&cat.id) {
            cats.insert(cat.id, cat.clone());
            Ok(cat)
        } else {
            Err(StorageError::NotFound(format!(
                "Cat with id {} not found",
                cat.id
            )))
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Cat, StorageError> {
        let mut cats = self.cats.write().unwrap();
        cats.remove(&id)
            .ok_or_else(|| StorageError::NotFound(format!("Cat with id {} not found", id)))
    }
}

#[async_trait]
impl UserStorage for InMemoryStorage {
    async fn save(&self, user: User) -> Result<User, StorageError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {} already exists",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let users = self.users.read().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StorageError> {
        let users = self.users.read().unwrap();
        let mut all: Vec<_> = users.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clowder_geo::Point;

    fn cat(name: &str, lat: f64, lon: f64, owner: Uuid) -> Cat {
        Cat::new(
            name.to_string(),
            4.0,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            Point::new(lat, lon),
            owner,
        )
    }

    #[tokio::test]
    async fn test_save_and_get_cat() {
        let storage = InMemoryStorage::new();
        let owner = Uuid::new_v4();

        let saved = CatStorage::save(&storage, cat("Nöpö", 60.17, 24.94, owner))
            .await
            .unwrap();
        let retrieved = CatStorage::get_by_id(&storage, saved.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved.id, saved.id);
        assert_eq!(retrieved.owner, owner);
    }

    #[tokio::test]
    async fn test_list_by_owner_returns_only_that_owners_cats() {
        let storage = InMemoryStorage::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        CatStorage::save(&storage, cat("A1", 60.0, 24.0, alice)).await.unwrap();
        CatStorage::save(&storage, cat("B1", 61.0, 25.0, bob)).await.unwrap();
        CatStorage::save(&storage, cat("A2", 62.0, 26.0, alice)).await.unwrap();

        let cats = storage.list_by_owner(alice).await.unwrap();
        assert_eq!(cats.len(), 2);
        assert!(cats.iter().all(|c| c.owner == alice));
    }

    #[tokio::test]
    async fn test_update_missing_cat_is_not_found() {
        let storage = InMemoryStorage::new();
        let ghost = cat("Ghost", 60.0, 24.0, Uuid::new_v4());
        let err = storage.update(ghost).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_the_deleted_record() {
        let storage = InMemoryStorage::new();
        let saved = CatStorage::save(&storage, cat("Nöpö", 60.17, 24.94, Uuid::new_v4()))
            .await
            .unwrap();

        let deleted = storage.delete(saved.id).await.unwrap();
        assert_eq!(deleted.id, saved.id);
        assert!(CatStorage::get_by_id(&storage, saved.id).await.unwrap().is_none());
        assert!(matches!(
            storage.delete(saved.id).await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_pushdown_agrees_with_in_memory_filter() {
        let storage = InMemoryStorage::new();
        let owner = Uuid::new_v4();
        for (name, lat, lon) in [
            ("in-1", 40.72, -73.97),
            ("north", 41.00, -73.97),
            ("in-edge", 40.73, -73.93),
            ("west", 40.72, -75.00),
        ] {
            CatStorage::save(&storage, cat(name, lat, lon, owner)).await.unwrap();
        }
        let bbox = BoundingBox::new(Point::new(40.71, -74.01), Point::new(40.73, -73.93));

        let pushed = storage.find_in_box(&bbox).await.unwrap();
        let filtered = filter_by_box(CatStorage::list(&storage).await.unwrap(), &bbox).unwrap();

        let pushed_ids: Vec<_> = pushed.iter().map(|c| c.id).collect();
        let filtered_ids: Vec<_> = filtered.iter().map(|c| c.id).collect();
        assert_eq!(pushed_ids, filtered_ids);
        assert_eq!(pushed.len(), 2);
    }

    #[tokio::test]
    async fn test_find_in_box_rejects_inverted_box() {
        let storage = InMemoryStorage::new();
        let bbox = BoundingBox::new(Point::new(40.73, -74.01), Point::new(40.71, -73.93));
        let err = storage.find_in_box(&bbox).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_duplicate_user_email_is_rejected() {
        let storage = InMemoryStorage::new();
        let user = User::new("matti".to_string(), "matti@example.com".to_string());
        UserStorage::save(&storage, user).await.unwrap();

        let dup = User::new("m2".to_string(), "matti@example.com".to_string());
        let err = UserStorage::save(&storage, dup).await.unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }
}
