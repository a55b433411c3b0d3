//! Wiring of the gateways, the navigator and the views for one invocation.

use std::sync::Arc;

use common::UiConfig;
use session_gateway::{SessionGatewayConfig, SessionManager};
use views::{Access, AppContext, HeaderView, History, Navigator, Notice, Route};

use crate::error::{CommandError, CommandResult};

pub struct App {
    pub ctx: AppContext,
    pub history: Arc<History>,
}

impl App {
    /// Build the HTTP-backed context, starting on `start`
    pub fn from_env(start: Route) -> Self {
        let config = SessionGatewayConfig::from_env();
        let gateway = Arc::new(SessionManager::from_config(&config));
        let listings = Arc::new(listing_repository::connect(
            config.backend.clone(),
            gateway.clone(),
        ));
        let history = Arc::new(History::new(start));

        let ctx = AppContext::new(gateway, listings, history.clone(), UiConfig::from_env());
        Self { ctx, history }
    }

    /// Print the header for the current session
    pub async fn print_header(&self) {
        let mut header = HeaderView::new(self.ctx.clone());
        header.mount().await;
        println!("{}", header);
    }

    /// Fail when a gated view sent the user away
    pub fn check_access(&self, access: Access) -> CommandResult<()> {
        match access {
            Access::Redirected => Err(CommandError::Redirected(self.history.current())),
            Access::Loading | Access::Ready => Ok(()),
        }
    }

    /// Apply a pending redirect, printing where it led
    pub async fn settle(&self) {
        if let Some(route) = self.history.settle().await {
            println!("→ {}", route);
        }
    }
}

/// Turn an error notice into a command failure
pub fn check_notice(notice: Option<&Notice>) -> CommandResult<()> {
    match notice {
        Some(notice) if notice.is_error() => Err(CommandError::Failed(notice.text().to_string())),
        _ => Ok(()),
    }
}
