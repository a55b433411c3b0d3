//! Bearer token seam between the session gateway and the data-store client.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Supplies the access token of the current session, if any.
///
/// Implemented by the session gateway; the data-store client falls back
/// to the public API key when no token is available.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

/// Token source for anonymous access (never yields a token)
pub struct Anonymous;

#[async_trait]
impl TokenSource for Anonymous {
    async fn access_token(&self) -> Option<String> {
        None
    }
}
