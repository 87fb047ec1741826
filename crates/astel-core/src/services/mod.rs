//! Application services composed over the ports.
//!
//! Adapters (the CLI) hold these services and never call ports directly.

mod registry_service;
mod session_service;

pub use registry_service::{NewPayment, PaymentChange, RegistryService};
pub use session_service::SessionService;
