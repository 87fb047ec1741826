//! Core domain types and port definitions for the ASTEL registry client.
//!
//! This crate owns the registration/payment data model, the filter and
//! pagination contract shared with the remote service, the session context
//! and the debounced autocomplete. It has no HTTP or filesystem
//! implementation details: adapters implement the traits in [`ports`].

#![deny(unused_crate_dependencies)]

pub mod autocomplete;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;
pub mod session;

// Re-export commonly used types for convenience
pub use autocomplete::{
    AutocompleteConfig, Autocompleter, DEFAULT_AUTOCOMPLETE_LIMIT, MIN_AUTOCOMPLETE_CHARS,
    Suggestions,
};
pub use domain::{
    AutocompleteItem, ImportKind, ImportLogEntry, InvalidPaymentKey, PaymentKey, PaymentMethod,
    PaymentRecord, PaymentRow, RegistrationRecord,
};
pub use ports::{
    AutocompleteLookup, ExportFormat, ExportRequest, RegistryPort, RegistryPortError,
    RegistryPortResult, SessionStore,
};
pub use query::{
    DEFAULT_PAGE_SIZE, HeaderTotals, ListQuery, Page, PageMeta, PageRequest, Pager,
    PayloadTotals, PaymentFilter, QueryParams, RegistrationFilter,
};
pub use services::{NewPayment, PaymentChange, RegistryService, SessionService};
pub use session::{Authenticator, Credentials, Session, SessionError, SessionPolicy};

// Silence unused dev-dependency warnings; mock-based tests live in submodules
#[cfg(test)]
use tokio_test as _;
