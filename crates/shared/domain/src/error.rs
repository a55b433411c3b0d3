//! Domain-level errors.
//!
//! Form and field validation failures caught before anything is sent to the
//! backend. They are independent of transport concerns.

use thiserror::Error;

/// Validation failures for user-submitted forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left empty
    #[error("{0} alanı zorunludur")]
    MissingField(&'static str),

    /// Price could not be parsed as a non-negative number
    #[error("Geçersiz fiyat: {0}")]
    InvalidPrice(String),

    /// Category is not one of the fixed set
    #[error("Geçersiz kategori: {0}")]
    InvalidCategory(String),

    /// Price type is not one of the fixed set
    #[error("Geçersiz fiyat tipi: {0}")]
    InvalidPriceType(String),

    /// Password shorter than the minimum length
    #[error("Şifre en az {0} karakter olmalıdır")]
    PasswordTooShort(usize),

    /// Malformed email address
    #[error("Geçersiz email adresi")]
    InvalidEmail,

    /// Any other field-level rule
    #[error("{0}")]
    Invalid(String),
}

impl ValidationError {
    /// Create a free-form validation error
    pub fn invalid(msg: impl Into<String>) -> Self {
        ValidationError::Invalid(msg.into())
    }

    /// Create a price error
    pub fn price(raw: impl Into<String>) -> Self {
        ValidationError::InvalidPrice(raw.into())
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} alanı geçersiz", field));
                ValidationError::Invalid(message)
            }
            None => ValidationError::invalid("Form geçersiz"),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, ValidationError>;
