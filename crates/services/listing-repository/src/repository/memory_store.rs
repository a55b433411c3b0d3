//! In-memory data store for tests and local runs.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use common::{RepositoryError, RepositoryResult};
use domain::{Listing, NewListing, Profile, UpdateProfile};

use super::{ListingRepository, ProfileRepository};

#[derive(Default)]
struct State {
    listings: Vec<Listing>,
    profiles: HashMap<Uuid, Profile>,
    last_created: Option<DateTime<Utc>>,
    failure: Option<RepositoryError>,
}

/// Listing and profile store kept in memory.
///
/// Behaves like the hosted backend: assigns ids and strictly increasing
/// creation times, returns listings newest first and only lets owners
/// delete their listings.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing listing
    pub fn with_listing(self, listing: Listing) -> Self {
        self.lock().listings.push(listing);
        self
    }

    /// Seed an existing profile
    pub fn with_profile(self, profile: Profile) -> Self {
        self.lock().profiles.insert(profile.id, profile);
        self
    }

    /// Make every following call fail with `err` until cleared with `None`
    pub fn set_failure(&self, err: Option<RepositoryError>) {
        self.lock().failure = err;
    }

    pub fn listing_count(&self) -> usize {
        self.lock().listings.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Lock the state, failing if a failure is armed
    fn guarded(&self) -> RepositoryResult<MutexGuard<'_, State>> {
        let state = self.lock();
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(state),
        }
    }
}

fn newest_first(mut listings: Vec<Listing>) -> Vec<Listing> {
    listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    listings
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn select_all(&self) -> RepositoryResult<Vec<Listing>> {
        let state = self.guarded()?;
        Ok(newest_first(state.listings.clone()))
    }

    async fn select_by_owner(&self, owner: Uuid) -> RepositoryResult<Vec<Listing>> {
        let state = self.guarded()?;
        let owned = state
            .listings
            .iter()
            .filter(|l| l.is_owned_by(owner))
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn insert(&self, listing: NewListing) -> RepositoryResult<Listing> {
        let mut state = self.guarded()?;

        let mut created_at = Utc::now();
        if let Some(last) = state.last_created {
            if created_at <= last {
                created_at = last + Duration::milliseconds(1);
            }
        }
        state.last_created = Some(created_at);

        let stored = Listing {
            id: Uuid::new_v4(),
            title: listing.title,
            description: listing.description,
            category: listing.category,
            price: listing.price,
            price_type: listing.price_type,
            location: listing.location,
            user_id: listing.user_id,
            rating: 0.0,
            review_count: 0,
            created_at,
        };
        state.listings.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> RepositoryResult<()> {
        let mut state = self.guarded()?;
        let index = state
            .listings
            .iter()
            .position(|l| l.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if !state.listings[index].is_owned_by(owner) {
            return Err(RepositoryError::Forbidden);
        }
        state.listings.remove(index);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn select_by_id(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        let state = self.guarded()?;
        Ok(state.profiles.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: UpdateProfile) -> RepositoryResult<Profile> {
        let mut state = self.guarded()?;
        let profile = state.profiles.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        profile.apply(&patch);
        Ok(profile.clone())
    }
}
