//! Repository layer for data access.

#[cfg(any(test, feature = "test-utils"))]
mod memory_store;
mod rest_store;

use async_trait::async_trait;
use uuid::Uuid;

use common::RepositoryResult;
use domain::{Listing, NewListing, Profile, UpdateProfile};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg(any(test, feature = "test-utils"))]
pub use memory_store::MemoryStore;
pub use rest_store::RestStore;

/// Listing repository trait for dependency injection.
///
/// Every query returns listings newest first (`created_at` descending).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// All listings
    async fn select_all(&self) -> RepositoryResult<Vec<Listing>>;

    /// Listings owned by `owner`
    async fn select_by_owner(&self, owner: Uuid) -> RepositoryResult<Vec<Listing>>;

    /// Persist a new listing; the backend assigns id and timestamps
    async fn insert(&self, listing: NewListing) -> RepositoryResult<Listing>;

    /// Delete listing `id` on behalf of `owner`.
    ///
    /// `NotFound` when no such listing exists, `Forbidden` when it belongs
    /// to someone else.
    async fn delete(&self, id: Uuid, owner: Uuid) -> RepositoryResult<()>;
}

/// Profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by user ID
    async fn select_by_id(&self, id: Uuid) -> RepositoryResult<Option<Profile>>;

    /// Apply a partial update and return the stored profile
    async fn update(&self, id: Uuid, patch: UpdateProfile) -> RepositoryResult<Profile>;
}
