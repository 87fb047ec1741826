//! HTTP adapter for the ASTEL registration and payments service.
//!
//! [`DefaultApiClient`] implements the core [`astel_core::RegistryPort`] and
//! [`astel_core::AutocompleteLookup`] ports over reqwest. Consumers should
//! hold it through those traits.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultApiClient is meant to be used
// through the port traits, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultApiClient;

// Configuration
pub use config::ApiClientConfig;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
