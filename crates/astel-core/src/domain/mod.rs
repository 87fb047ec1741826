//! Domain types for registrations, payments and import history.
//!
//! These are pure data types with no infrastructure dependencies. Field
//! names on the wire follow the service's camelCase JSON.

mod dates;
mod import_log;
mod payment;
mod payment_method;
mod registration;

pub use import_log::{ImportKind, ImportLogEntry};
pub use payment::{InvalidPaymentKey, PaymentKey, PaymentRecord, PaymentRow};
pub use payment_method::PaymentMethod;
pub use registration::{AutocompleteItem, RegistrationRecord};
