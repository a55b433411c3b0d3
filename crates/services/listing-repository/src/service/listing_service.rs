//! Listing service - Marketplace use cases over the data store.
//!
//! Validates forms before anything reaches the backend and funnels every
//! store failure into `AppError`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, RepositoryError};
use domain::{Listing, ListingForm, Profile, UpdateProfile};

use crate::repository::{ListingRepository, ProfileRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Listing service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingService: Send + Sync {
    /// All listings, newest first
    async fn list_all(&self) -> AppResult<Vec<Listing>>;

    /// Validate `form` and publish it as a listing owned by `owner`
    async fn create(&self, form: ListingForm, owner: Uuid) -> AppResult<Listing>;

    /// Apply a partial profile update
    async fn update_profile(&self, profile_id: Uuid, patch: UpdateProfile) -> AppResult<Profile>;

    /// Delete a listing on behalf of its owner
    async fn delete(&self, listing_id: Uuid, requester: Uuid) -> AppResult<()>;

    /// Profile of `user_id`, if one exists
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Listings owned by `owner`, newest first
    async fn list_mine(&self, owner: Uuid) -> AppResult<Vec<Listing>>;
}

/// Concrete implementation of ListingService using repositories.
pub struct ListingManager {
    listings: Arc<dyn ListingRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ListingManager {
    /// Create new listing service instance with repositories
    pub fn new(listings: Arc<dyn ListingRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { listings, profiles }
    }
}

#[async_trait]
impl ListingService for ListingManager {
    async fn list_all(&self) -> AppResult<Vec<Listing>> {
        Ok(self.listings.select_all().await?)
    }

    async fn create(&self, form: ListingForm, owner: Uuid) -> AppResult<Listing> {
        let new_listing = form.into_new_listing(owner)?;
        let listing = self.listings.insert(new_listing).await?;

        info!(listing_id = %listing.id, user_id = %owner, category = %listing.category, "Listing created");
        Ok(listing)
    }

    async fn update_profile(&self, profile_id: Uuid, patch: UpdateProfile) -> AppResult<Profile> {
        if patch.is_empty() {
            return self
                .profiles
                .select_by_id(profile_id)
                .await?
                .ok_or(AppError::Repository(RepositoryError::NotFound));
        }

        let profile = self.profiles.update(profile_id, patch).await?;
        info!(user_id = %profile_id, "Profile updated");
        Ok(profile)
    }

    async fn delete(&self, listing_id: Uuid, requester: Uuid) -> AppResult<()> {
        match self.listings.delete(listing_id, requester).await {
            Ok(()) => {
                info!(%listing_id, user_id = %requester, "Listing deleted");
                Ok(())
            }
            Err(e) => {
                warn!(%listing_id, user_id = %requester, code = e.code(), "Listing delete refused");
                Err(e.into())
            }
        }
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.profiles.select_by_id(user_id).await?)
    }

    async fn list_mine(&self, owner: Uuid) -> AppResult<Vec<Listing>> {
        Ok(self.listings.select_by_owner(owner).await?)
    }
}
