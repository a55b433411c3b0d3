//! Listing service business logic.

mod listing_service;

pub use listing_service::{ListingManager, ListingService};

#[cfg(any(test, feature = "test-utils"))]
pub use listing_service::MockListingService;
