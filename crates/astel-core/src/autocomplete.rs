//! Debounced name autocomplete.
//!
//! Each call to [`Autocompleter::suggest`] takes a new generation number.
//! A call waits out the debounce window before querying the service, and
//! its result is only returned if no newer call started in the meantime.
//! Stale calls resolve to [`Suggestions::Superseded`], so a slow response
//! can never overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::AutocompleteItem;
use crate::ports::{AutocompleteLookup, RegistryPortResult};

/// Minimum number of characters before a lookup is issued.
pub const MIN_AUTOCOMPLETE_CHARS: usize = 2;

/// Default maximum number of suggestions.
pub const DEFAULT_AUTOCOMPLETE_LIMIT: u32 = 10;

/// Tuning for [`Autocompleter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutocompleteConfig {
    pub debounce: Duration,
    pub limit: u32,
    pub min_chars: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            limit: DEFAULT_AUTOCOMPLETE_LIMIT,
            min_chars: MIN_AUTOCOMPLETE_CHARS,
        }
    }
}

/// Outcome of one autocomplete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// The term is shorter than the minimum; nothing was requested.
    TooShort,
    /// A newer call started; this one's result was dropped.
    Superseded,
    /// Suggestions for the latest term.
    Ready(Vec<AutocompleteItem>),
}

/// Debounced, generation-guarded autocomplete over a lookup port.
pub struct Autocompleter<L: AutocompleteLookup + ?Sized> {
    lookup: Arc<L>,
    config: AutocompleteConfig,
    generation: AtomicU64,
}

impl<L: AutocompleteLookup + ?Sized> Autocompleter<L> {
    pub const fn new(lookup: Arc<L>, config: AutocompleteConfig) -> Self {
        Self {
            lookup,
            config,
            generation: AtomicU64::new(0),
        }
    }

    pub const fn config(&self) -> AutocompleteConfig {
        self.config
    }

    /// Invalidate every call still in flight.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Suggest registrations for `term`.
    ///
    /// Errors are only reported for the latest call; a superseded call that
    /// failed still resolves to `Superseded`.
    pub async fn suggest(&self, term: &str) -> RegistryPortResult<Suggestions> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let term = term.trim();

        if term.chars().count() < self.config.min_chars {
            return Ok(Suggestions::TooShort);
        }

        if !self.config.debounce.is_zero() {
            tokio::time::sleep(self.config.debounce).await;
        }
        if !self.is_current(ticket) {
            tracing::trace!(term, "autocomplete superseded before request");
            return Ok(Suggestions::Superseded);
        }

        let result = self.lookup.lookup(term, self.config.limit).await;
        if !self.is_current(ticket) {
            tracing::trace!(term, "autocomplete response discarded as stale");
            return Ok(Suggestions::Superseded);
        }

        result.map(Suggestions::Ready)
    }
}
