//! Registry service port definitions.
//!
//! This module defines the port trait and DTOs for talking to the
//! registration/payment service. The HTTP implementation lives in `astel-api`.

mod client;
mod error;
mod export;

pub use client::RegistryPort;
pub use error::{RegistryPortError, RegistryPortResult};
pub use export::{
    ExportFormat, ExportRequest, PAYMENT_EXPORT_COLUMNS, REGISTRATION_EXPORT_COLUMNS,
};
