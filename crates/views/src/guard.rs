//! Session gating for protected views.

use tracing::{debug, warn};

use domain::Session;

use crate::context::AppContext;
use crate::navigation::Route;

/// Outcome of the session check.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    Granted(Session),
    /// No session; the user was sent to the login page
    Redirected,
}

/// Where a gated view stands with respect to its session check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// Session check still running
    #[default]
    Loading,
    Redirected,
    Ready,
}

/// Require a session, navigating to Login when there is none.
///
/// A failed session check counts as signed out.
pub async fn require_session(ctx: &AppContext) -> Gate {
    match ctx.gateway.current_session().await {
        Ok(Some(session)) => Gate::Granted(session),
        Ok(None) => {
            debug!("No session, redirecting to login");
            ctx.navigator.navigate(Route::Login);
            Gate::Redirected
        }
        Err(e) => {
            warn!(code = e.code(), "Session check failed, redirecting to login");
            ctx.navigator.navigate(Route::Login);
            Gate::Redirected
        }
    }
}
