//! Session value types and the login forms.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainResult, ValidationError};

/// Metadata captured at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// The authenticated user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl SessionUser {
    /// Full name when set, otherwise the email address
    pub fn display_name(&self) -> &str {
        match self.user_metadata.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Runtime proof of an authenticated user.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

// Don't expose tokens in debug output
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Check whether the access token is expired, allowing `leeway`
    pub fn is_expired(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        match self.expires_at.checked_sub_signed(leeway) {
            Some(deadline) => deadline <= now,
            None => true,
        }
    }
}

/// Session transitions delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl std::fmt::Display for AuthChangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuthChangeEvent::SignedIn => "SIGNED_IN",
            AuthChangeEvent::SignedOut => "SIGNED_OUT",
            AuthChangeEvent::TokenRefreshed => "TOKEN_REFRESHED",
            AuthChangeEvent::UserUpdated => "USER_UPDATED",
        };
        f.write_str(name)
    }
}

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Provider confirmed the account immediately and issued a session
    Confirmed(Session),
    /// Account created; the user must verify their email first
    PendingConfirmation { user: SessionUser },
}

/// Sign-in form.
#[derive(Debug, Clone, Default, Validate)]
pub struct SignInForm {
    #[validate(email(message = "Geçersiz email adresi"))]
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn check(&self) -> DomainResult<()> {
        self.validate()?;
        check_password(&self.password)
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default, Validate)]
pub struct SignUpForm {
    #[validate(email(message = "Geçersiz email adresi"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "Ad Soyad zorunludur"))]
    pub full_name: String,
}

impl SignUpForm {
    pub fn check(&self) -> DomainResult<()> {
        self.validate()?;
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::MissingField("Ad Soyad"));
        }
        check_password(&self.password)
    }
}

/// Enforce the minimum password length (counted in characters).
pub fn check_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}
