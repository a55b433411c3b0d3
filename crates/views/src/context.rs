//! Shared view context for dependency injection.

use std::sync::Arc;

use common::UiConfig;
use listing_repository::ListingService;
use session_gateway::SessionGateway;

use crate::navigation::Navigator;

/// Collaborators shared by every view.
#[derive(Clone)]
pub struct AppContext {
    pub gateway: Arc<dyn SessionGateway>,
    pub listings: Arc<dyn ListingService>,
    pub navigator: Arc<dyn Navigator>,
    pub ui: UiConfig,
}

impl AppContext {
    /// Create new view context.
    pub fn new(
        gateway: Arc<dyn SessionGateway>,
        listings: Arc<dyn ListingService>,
        navigator: Arc<dyn Navigator>,
        ui: UiConfig,
    ) -> Self {
        Self {
            gateway,
            listings,
            navigator,
            ui,
        }
    }
}
