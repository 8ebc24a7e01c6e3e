//! Storage traits defining the interface for persistence

use async_trait::async_trait;
use clowder_core::{Cat, User};
use clowder_geo::BoundingBox;
use uuid::Uuid;

use crate::StorageError;

/// Trait for cat storage operations.
///
/// Mutation methods only persist; deciding whether the caller is allowed
/// to mutate happens before these are called.
#[async_trait]
pub trait CatStorage: Send + Sync {
    /// Save a new cat
    async fn save(&self, cat: Cat) -> Result<Cat, StorageError>;

    /// Get a cat by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Cat>, StorageError>;

    /// List all cats
    async fn list(&self) -> Result<Vec<Cat>, StorageError>;

    /// List all cats belonging to one owner
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Cat>, StorageError>;

    /// Find cats located within a bounding box.
    ///
    /// Implementations may push the predicate down to the backend, but the
    /// result must be identical to filtering `list()` through
    /// `clowder_geo::filter_by_box`.
    async fn find_in_box(&self, bbox: &BoundingBox) -> Result<Vec<Cat>, StorageError>;

    /// Update an existing cat
    async fn update(&self, cat: Cat) -> Result<Cat, StorageError>;

    /// Delete a cat, returning the deleted record
    async fn delete(&self, id: Uuid) -> Result<Cat, StorageError>;
}

/// Trait for user storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Save a new user
    async fn save(&self, user: User) -> Result<User, StorageError>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, StorageError>;
}
