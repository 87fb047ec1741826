//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - No filesystem details in the session store contract
//! - Errors are core-owned; adapters map their own errors at the boundary

pub mod autocomplete;
pub mod registry;
pub mod session_store;

pub use autocomplete::AutocompleteLookup;
pub use registry::{
    ExportFormat, ExportRequest, PAYMENT_EXPORT_COLUMNS, REGISTRATION_EXPORT_COLUMNS,
    RegistryPort, RegistryPortError, RegistryPortResult,
};
pub use session_store::SessionStore;
