//! Domain-level constants.
//!
//! These constants define marketplace rules and the wire names shared with
//! the hosted backend.

// =============================================================================
// Categories
// =============================================================================

/// Sentinel category meaning "no filter"
pub const CATEGORY_ALL: &str = "Tümü";

/// Navigation query parameter carrying the selected category
pub const CATEGORY_QUERY_PARAM: &str = "category";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length accepted on sign-up and sign-in
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Backend tables
// =============================================================================

/// Listings collection name
pub const LISTINGS_TABLE: &str = "listings";

/// Profiles collection name
pub const PROFILES_TABLE: &str = "profiles";

/// Sort key for listings (always descending)
pub const LISTINGS_ORDER_COLUMN: &str = "created_at";

// =============================================================================
// Display
// =============================================================================

/// Currency symbol prefixed to prices
pub const CURRENCY_SYMBOL: &str = "₺";

/// Brand name shown in the header
pub const BRAND_NAME: &str = "Ayva";
