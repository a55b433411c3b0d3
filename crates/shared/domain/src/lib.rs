//! Domain layer - Marketplace entities, forms and the listing filter.
//!
//! This crate contains pure domain logic with no I/O.
//! All types here are shared by the session gateway, the listing
//! repository and the views.

pub mod category;
pub mod constants;
pub mod error;
pub mod filter;
pub mod listing;
pub mod profile;
pub mod session;

pub use category::{Category, PriceType};
pub use constants::*;
pub use error::{DomainResult, ValidationError};
pub use filter::{filter_by_category, CategoryFilter};
pub use listing::{format_price, parse_price, Listing, ListingForm, NewListing};
pub use profile::{Profile, ProfileForm, UpdateProfile};
pub use session::{
    check_password, AuthChangeEvent, Session, SessionUser, SignInForm, SignUpForm, SignUpOutcome,
    UserMetadata,
};
