//! The list-query contract shared with the service.
//!
//! Filters encode themselves into query strings; page metadata is resolved
//! from response headers and payload aggregates; [`Pager`] keeps the
//! navigation state between requests.

mod filters;
mod page;
mod pager;
mod params;

pub use filters::{ListQuery, PaymentFilter, RegistrationFilter};
pub use page::{DEFAULT_PAGE_SIZE, HeaderTotals, Page, PageMeta, PageRequest, PayloadTotals};
pub use pager::Pager;
pub use params::QueryParams;
