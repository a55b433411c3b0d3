//! Listing Repository Library
//!
//! This crate reads and writes marketplace listings and user profiles in
//! the hosted data store. `ListingService` is what the views talk to; the
//! repository traits below it are the data-store boundary.

pub mod repository;
pub mod service;

use std::sync::Arc;

use common::{BackendConfig, TokenSource};

pub use repository::{ListingRepository, ProfileRepository, RestStore};
pub use service::{ListingManager, ListingService};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::{MemoryStore, MockListingRepository, MockProfileRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use service::MockListingService;

/// Build the HTTP-backed listing service.
///
/// `tokens` supplies the signed-in user's access token for each request.
pub fn connect(config: BackendConfig, tokens: Arc<dyn TokenSource>) -> ListingManager {
    let store = Arc::new(RestStore::new(config, tokens));
    ListingManager::new(store.clone(), store)
}
