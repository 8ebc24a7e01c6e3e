//! Storage layer for Clowder
//!
//! Provides persistence for cats and users behind async traits, with an
//! in-memory backend for development and testing. The bounding-box
//! pushdown (`find_in_box`) is contractually equivalent to running the
//! geo engine's filter over the full listing.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::StorageError;
pub use memory::InMemoryStorage;
pub use traits::{CatStorage, UserStorage};

/// Unified storage trait
#[async_trait::async_trait]
pub trait Storage: CatStorage + UserStorage + Send + Sync {}

#[async_trait::async_trait]
impl<T> Storage for T where T: CatStorage + UserStorage + Send + Sync {}
