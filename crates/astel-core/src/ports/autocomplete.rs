//! Name lookup port used by the autocomplete.

use async_trait::async_trait;

use super::registry::RegistryPortResult;
use crate::domain::AutocompleteItem;

/// Port for the name autocomplete endpoint.
#[async_trait]
pub trait AutocompleteLookup: Send + Sync {
    /// Up to `limit` registrations whose name matches `term`.
    async fn lookup(&self, term: &str, limit: u32) -> RegistryPortResult<Vec<AutocompleteItem>>;
}
