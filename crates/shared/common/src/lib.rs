//! Common utilities shared across the marketplace crates.
//!
//! This crate provides:
//! - The error taxonomy (auth, repository, validation) and `AppError`
//! - Configuration structures
//! - The `TokenSource` seam used to authorize data-store requests

pub mod config;
pub mod error;
pub mod token;

pub use config::*;
pub use error::{AppError, AppResult, AuthError, AuthResult, RepositoryError, RepositoryResult};
pub use token::{Anonymous, TokenSource};

#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenSource;
