//! Session gateway business logic.

mod session_gateway;

pub use session_gateway::{SessionGateway, SessionManager};

#[cfg(any(test, feature = "test-utils"))]
pub use session_gateway::MockSessionGateway;
