//! Category filter for listing views.
//!
//! Pure and synchronous: derives the displayed subset from the full,
//! already ordered listing set and an optional category taken from the
//! navigation location. The input is never mutated; when no filtering is
//! requested the very same slice is handed back.

use std::borrow::Cow;

use crate::constants::CATEGORY_ALL;
use crate::listing::Listing;

/// Parsed value of the navigation `category` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Absent, empty, or the `Tümü` sentinel
    #[default]
    All,
    /// Restrict to listings whose category wire name equals this value
    Only(String),
}

impl CategoryFilter {
    /// Interpret an optional raw query value
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(value) if value == CATEGORY_ALL => CategoryFilter::All,
            Some(value) => CategoryFilter::Only(value.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Category name for display and for the query string
    pub fn as_query(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(name) => Some(name),
        }
    }

    /// Apply this filter to `listings`
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Cow<'a, [Listing]> {
        filter_by_category(listings, self.as_query())
    }
}

/// Restrict `listings` to `category`, preserving relative order.
///
/// `None` and the `Tümü` sentinel return the input unchanged
/// (`Cow::Borrowed`). Any other value keeps exactly the listings whose
/// category name equals it; an unknown name yields an empty set.
pub fn filter_by_category<'a>(listings: &'a [Listing], category: Option<&str>) -> Cow<'a, [Listing]> {
    match category {
        None => Cow::Borrowed(listings),
        Some(name) if name == CATEGORY_ALL => Cow::Borrowed(listings),
        Some(name) => Cow::Owned(
            listings
                .iter()
                .filter(|listing| listing.category.as_str() == name)
                .cloned()
                .collect(),
        ),
    }
}
