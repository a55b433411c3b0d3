//! Commands module - CLI command implementations.
//!
//! Each command mounts the matching view, prints it and settles any
//! pending redirect.

pub mod account;
pub mod browse;
pub mod listing;
pub mod profile;
