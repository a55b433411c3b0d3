//! Profile entity and the edit-profile form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainResult;

/// Public-facing part of a user account. `id` equals the user's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Empty profile, as created alongside a new account
    pub fn empty(id: Uuid) -> Self {
        Self {
            id,
            full_name: None,
            phone: None,
            avatar_url: None,
        }
    }

    /// Apply a partial update; absent fields keep their value
    pub fn apply(&mut self, patch: &UpdateProfile) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = Some(full_name.clone());
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(avatar_url) = &patch.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
    }
}

/// Partial profile update. Only the mutable fields exist here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UpdateProfile {
    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone.is_none() && self.avatar_url.is_none()
    }
}

/// Edit-profile form. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone: String,
    #[validate(custom(function = "validate_avatar_url"))]
    pub avatar_url: String,
}

impl ProfileForm {
    /// Pre-fill from an existing profile, defaulting missing fields to empty
    pub fn from_profile(profile: Option<&Profile>) -> Self {
        match profile {
            Some(p) => Self {
                full_name: p.full_name.clone().unwrap_or_default(),
                phone: p.phone.clone().unwrap_or_default(),
                avatar_url: p.avatar_url.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }

    /// Build the patch sent on submit; all three fields are written.
    pub fn into_update(self) -> DomainResult<UpdateProfile> {
        self.validate()?;

        Ok(UpdateProfile {
            full_name: Some(self.full_name.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            avatar_url: Some(self.avatar_url.trim().to_string()),
        })
    }
}

fn validate_avatar_url(value: &str) -> Result<(), validator::ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Ok(());
    }

    let mut err = validator::ValidationError::new("avatar_url");
    err.message = Some("Avatar URL http:// veya https:// ile başlamalıdır".into());
    Err(err)
}
