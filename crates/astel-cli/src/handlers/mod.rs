//! Command handlers that delegate to the core services.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn <op>(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call `RegistryService` / `SessionService` methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT build URLs, talk HTTP or hold business rules.

pub mod cadastro;
pub mod financeiro;
pub mod find;
pub mod imports;
pub mod session;

mod files;
