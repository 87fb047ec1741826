//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Domain transforms belong in core services

pub mod record_display;
pub mod tables;

// Re-export commonly used items
pub use record_display::{display_payment, display_registration};
pub use tables::{
    format_money, format_optional, page_footer, page_navigation, print_separator, truncate_string,
};
