//! Page views.

mod create_listing;
mod edit_profile;
mod header;
mod home;
mod login;
mod profile;

use std::fmt;

use domain::Listing;

pub use create_listing::{category_options, price_type_options, CreateListingView};
pub use edit_profile::EditProfileView;
pub use header::{category_links, service_links, Dialog, HeaderAction, HeaderView, Link};
pub use home::HomeView;
pub use login::{LoginMode, LoginView};
pub use profile::ProfileView;

/// Listing card shared by Home and Profile
pub(crate) fn write_listing_card(f: &mut fmt::Formatter<'_>, listing: &Listing) -> fmt::Result {
    writeln!(f, "- {} [{}]", listing.title, listing.category)?;
    writeln!(f, "  {}", listing.description)?;
    writeln!(
        f,
        "  {} · {} · ★ {} ({})",
        listing.display_price(),
        listing.location,
        listing.rating,
        listing.review_count
    )
}
