//! Session Gateway Library
//!
//! This crate owns the authenticated session of the marketplace client.
//! It talks to the hosted auth provider, persists the session between
//! runs and notifies subscribers whenever the session changes.

pub mod client;
pub mod config;
pub mod service;
pub mod storage;
pub mod store;

pub use client::{AuthProvider, GoTrueClient};
pub use config::SessionGatewayConfig;
pub use service::{SessionGateway, SessionManager};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{SessionHandler, SessionStore, Subscription};

#[cfg(any(test, feature = "test-utils"))]
pub use client::{MemoryAuthProvider, MockAuthProvider};
#[cfg(any(test, feature = "test-utils"))]
pub use service::MockSessionGateway;
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockSessionStorage;
