use tracing::trace;

use crate::params::QueryParams;

/// Sink for the address bar's search string.
pub trait History {
    /// Replaces the current entry's search string in place. Never navigates
    /// and never pushes a new entry.
    fn replace_search(&mut self, search: &str);
}

impl<H: History + ?Sized> History for &mut H {
    fn replace_search(&mut self, search: &str) {
        (**self).replace_search(search);
    }
}

/// Used outside a browser context, where there is no address bar to mirror.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl History for NoHistory {
    fn replace_search(&mut self, _search: &str) {}
}

/// Keeps the mirrored search string in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
    search: String,
    replacements: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The visible search string, including the leading `?` when non-empty.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl History for MemoryHistory {
    fn replace_search(&mut self, search: &str) {
        self.search = if search.is_empty() {
            String::new()
        } else {
            format!("?{search}")
        };
        self.replacements += 1;
    }
}

/// Query parameters mirrored 1:1 into the address bar.
#[derive(Debug, Clone, Default)]
pub struct QueryParamStore<H: History = NoHistory> {
    params: QueryParams,
    history: H,
}

impl<H: History> QueryParamStore<H> {
    pub fn new(initial: Option<&str>, history: H) -> Self {
        Self {
            params: initial.map(QueryParams::parse).unwrap_or_default(),
            history,
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn set_params(&mut self, params: QueryParams) {
        self.params = params;
        self.sync();
    }

    /// Applies several mutations and mirrors the result once.
    pub fn update(&mut self, f: impl FnOnce(&mut QueryParams)) {
        f(&mut self.params);
        self.sync();
    }

    /// Sets `key`, or deletes it when `value` is `None`.
    pub fn set_query_param(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => self.params.set(key, value),
            None => {
                self.params.delete(key);
            }
        }
        self.sync();
    }

    pub fn remove(&mut self, key: &str) {
        self.set_query_param(key, None);
    }

    fn sync(&mut self) {
        let search = self.params.to_string();
        trace!(search = %search, "replacing address bar search");
        self.history.replace_search(&search);
    }
}
