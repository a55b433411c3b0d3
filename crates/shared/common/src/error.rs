//! Unified error handling for the marketplace client.
//!
//! Three failure families reach the views:
//! - `AuthError` for credential, account and auth-provider failures
//! - `RepositoryError` for data-store failures (backend authorization included)
//! - `domain::ValidationError` for forms rejected before submission
//!
//! `AppError` wraps all three so a view can catch one type and render
//! `user_message()` verbatim.

use domain::ValidationError;
use thiserror::Error;

// =============================================================================
// Auth
// =============================================================================

/// Failures of the external auth provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Geçersiz email veya şifre")]
    InvalidCredentials,

    #[error("Email adresi henüz doğrulanmadı")]
    EmailNotConfirmed,

    #[error("Bu email adresi zaten kayıtlı")]
    AlreadyRegistered,

    #[error("Şifre politikaya uymuyor: {0}")]
    WeakPassword(String),

    #[error("Çok fazla deneme, lütfen daha sonra tekrar deneyin")]
    TooManyRequests,

    /// Operation requires a session and there is none
    #[error("Oturum bulunamadı")]
    NoSession,

    /// Refresh token rejected; the user must sign in again
    #[error("Oturum süresi doldu")]
    SessionExpired,

    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("Ağ hatası: {0}")]
    Network(String),

    #[error("Beklenmeyen yanıt: {0}")]
    Decode(String),
}

impl AuthError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::EmailNotConfirmed => "EMAIL_NOT_CONFIRMED",
            AuthError::AlreadyRegistered => "ALREADY_REGISTERED",
            AuthError::WeakPassword(_) => "WEAK_PASSWORD",
            AuthError::TooManyRequests => "TOO_MANY_REQUESTS",
            AuthError::NoSession => "NO_SESSION",
            AuthError::SessionExpired => "SESSION_EXPIRED",
            AuthError::Provider { .. } => "PROVIDER_ERROR",
            AuthError::Network(_) => "NETWORK_ERROR",
            AuthError::Decode(_) => "DECODE_ERROR",
        }
    }

    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        AuthError::Provider {
            status,
            message: message.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        AuthError::Network(msg.into())
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Failures of the external data store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Kayıt bulunamadı")]
    NotFound,

    /// The backend refused the operation for this caller
    #[error("Bu işlem için yetkiniz yok")]
    Forbidden,

    /// Missing or expired credentials
    #[error("Oturum gerekli")]
    Unauthorized,

    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Ağ hatası: {0}")]
    Network(String),

    #[error("Beklenmeyen yanıt: {0}")]
    Decode(String),
}

impl RepositoryError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::NotFound => "NOT_FOUND",
            RepositoryError::Forbidden => "FORBIDDEN",
            RepositoryError::Unauthorized => "UNAUTHORIZED",
            RepositoryError::Backend { .. } => "BACKEND_ERROR",
            RepositoryError::Network(_) => "NETWORK_ERROR",
            RepositoryError::Decode(_) => "DECODE_ERROR",
        }
    }

    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        RepositoryError::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        RepositoryError::Network(msg.into())
    }
}

// =============================================================================
// Umbrella
// =============================================================================

/// Application error caught at the view boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Beklenmeyen hata")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Auth(e) => e.code(),
            AppError::Repository(e) => e.code(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides transport details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for user-correctable errors
            AppError::Validation(e) => e.to_string(),
            AppError::Auth(AuthError::Provider { message, .. }) => message.clone(),
            AppError::Repository(RepositoryError::Backend { message, .. }) => message.clone(),

            // Hide details for transport failures
            AppError::Auth(AuthError::Network(e)) | AppError::Repository(RepositoryError::Network(e)) => {
                tracing::error!("Network error: {}", e);
                "Sunucuya ulaşılamadı".to_string()
            }
            AppError::Auth(AuthError::Decode(e)) | AppError::Repository(RepositoryError::Decode(e)) => {
                tracing::error!("Decode error: {}", e);
                "Sunucudan beklenmeyen yanıt alındı".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Beklenmeyen bir hata oluştu".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Check whether the failure means the user has to sign in (again)
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AppError::Auth(AuthError::NoSession)
                | AppError::Auth(AuthError::SessionExpired)
                | AppError::Repository(RepositoryError::Unauthorized)
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

// =============================================================================
// HTTP transport conversion
// =============================================================================

#[cfg(feature = "http")]
impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::Decode(err.to_string())
        } else {
            AuthError::Network(err.to_string())
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Network(err.to_string())
        }
    }
}

/// Result alias for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Result alias for data-store operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
