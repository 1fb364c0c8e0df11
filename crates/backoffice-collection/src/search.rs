use std::time::{Duration, Instant};

use backoffice_query::{History, QueryParamStore};
use tracing::debug;

use crate::patch::CollectionPatch;
use crate::store::CollectionStore;

pub const SEARCH_PARAM: &str = "search";
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Collapses bursts of search input into one query-param write.
#[derive(Debug, Clone)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records the latest input; restarts the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Once the quiet period has passed, writes the search term to the address
    /// bar and the collection. Returns whether anything was written.
    pub fn poll<H: History>(
        &mut self,
        now: Instant,
        collection: &mut CollectionStore,
        params: &mut QueryParamStore<H>,
    ) -> bool {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.duration_since(*at) >= self.delay);
        if !ready {
            return false;
        }
        let Some((text, _)) = self.pending.take() else {
            return false;
        };

        let term = text.trim();
        let value = (!term.is_empty()).then_some(term);
        debug!(search = term, "applying search");

        params.set_query_param(SEARCH_PARAM, value);
        collection.update_with(|state| {
            let mut search_params = state.search_params.clone();
            match value {
                Some(term) => search_params.set(SEARCH_PARAM, term),
                None => {
                    search_params.delete(SEARCH_PARAM);
                }
            }
            CollectionPatch::new().search_params(search_params)
        });
        true
    }
}
