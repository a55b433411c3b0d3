//! Listing entity and the create-listing form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::category::{Category, PriceType};
use crate::constants::CURRENCY_SYMBOL;
use crate::error::{DomainResult, ValidationError};

/// A posted service offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub price_type: PriceType,
    pub location: String,
    /// Owner (the creating user's id)
    pub user_id: Uuid,
    /// Maintained by the backend
    #[serde(default)]
    pub rating: f64,
    /// Maintained by the backend
    #[serde(default)]
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Check whether `user_id` owns this listing
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Price as displayed on cards, e.g. `₺150` or `₺40/saat`
    pub fn display_price(&self) -> String {
        format_price(self.price, self.price_type)
    }
}

/// Format a price with its unit suffix (fixed prices carry none).
pub fn format_price(price: f64, price_type: PriceType) -> String {
    match price_type {
        PriceType::Fixed => format!("{}{}", CURRENCY_SYMBOL, price),
        other => format!("{}{}/{}", CURRENCY_SYMBOL, price, other.as_str()),
    }
}

/// Insert payload for a new listing.
///
/// `id`, `created_at`, `rating` and `review_count` are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub price_type: PriceType,
    pub location: String,
    pub user_id: Uuid,
}

/// Create-listing form as typed by the user.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ListingForm {
    #[validate(length(min = 1, message = "Başlık zorunludur"))]
    pub title: String,
    #[validate(length(min = 1, message = "Açıklama zorunludur"))]
    pub description: String,
    #[validate(length(min = 1, message = "Kategori zorunludur"))]
    pub category: String,
    #[validate(length(min = 1, message = "Fiyat zorunludur"))]
    pub price: String,
    #[validate(length(min = 1, message = "Fiyat tipi zorunludur"))]
    pub price_type: String,
    #[validate(length(min = 1, message = "Konum zorunludur"))]
    pub location: String,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: Category::default().as_str().to_string(),
            price: String::new(),
            price_type: PriceType::default().as_str().to_string(),
            location: String::new(),
        }
    }
}

impl ListingForm {
    /// Validate the form and build the insert payload for `owner`.
    ///
    /// Text fields are trimmed; whitespace-only values count as missing.
    pub fn into_new_listing(self, owner: Uuid) -> DomainResult<NewListing> {
        let form = self.trimmed();
        form.validate()?;

        let category = form.category.parse::<Category>()?;
        let price_type = form.price_type.parse::<PriceType>()?;
        let price = parse_price(&form.price)?;

        Ok(NewListing {
            title: form.title,
            description: form.description,
            category,
            price,
            price_type,
            location: form.location,
            user_id: owner,
        })
    }

    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            price: self.price.trim().to_string(),
            price_type: self.price_type.trim().to_string(),
            location: self.location.trim().to_string(),
        }
    }
}

/// Parse a user-entered price into a non-negative finite number.
///
/// A decimal comma is accepted (`"12,5"`).
pub fn parse_price(raw: &str) -> DomainResult<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(ValidationError::MissingField("Fiyat"));
    }

    let price: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::price(raw.trim()))?;

    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::price(raw.trim()));
    }

    Ok(price)
}
