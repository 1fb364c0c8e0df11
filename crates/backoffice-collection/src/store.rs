use backoffice_client::ClientError;
use backoffice_query::QueryParams;
use serde_json::Value;
use tracing::{debug, warn};

use crate::fetcher::Fetcher;
use crate::patch::CollectionPatch;
use crate::state::{Collection, LoadStatus};

/// What happens after a failed fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Stay in `Error` until the url, params or version change.
    #[default]
    Manual,
    /// Fetch again on the next poll, however often that is.
    OnNextPoll,
}

/// A fetch issued by [`CollectionStore::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub url: String,
}

/// Owns one [`Collection`] and decides when it needs fetching.
#[derive(Debug)]
pub struct CollectionStore {
    state: Collection,
    retry: RetryPolicy,
    next_seq: u64,
    in_flight: Option<u64>,
}

impl CollectionStore {
    /// Prefetched items start the collection loaded; otherwise it waits for a fetch.
    pub fn new(
        url: impl Into<String>,
        search_params: Option<QueryParams>,
        prefetched: Option<Vec<Value>>,
    ) -> Self {
        let (items, status) = match prefetched {
            Some(items) => (items, LoadStatus::Loaded),
            None => (Vec::new(), LoadStatus::Idle),
        };
        Self {
            state: Collection {
                items,
                status,
                url: url.into(),
                search_params: search_params.unwrap_or_default(),
                version: rand::random(),
                error: None,
            },
            retry: RetryPolicy::default(),
            next_seq: 1,
            in_flight: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn state(&self) -> &Collection {
        &self.state
    }

    pub fn items(&self) -> &[Value] {
        &self.state.items
    }

    /// Merges `patch` into the current state.
    ///
    /// `loaded` is taken from the patch when given. Otherwise a changed url,
    /// a differently serialised param set, or `reload` invalidates the
    /// collection, and anything else leaves the load status alone.
    pub fn update(&mut self, patch: CollectionPatch) {
        let state = &mut self.state;
        let url_changed = patch.url.as_ref().is_some_and(|url| *url != state.url);
        let params_changed = patch
            .search_params
            .as_ref()
            .is_some_and(|params| params.to_string() != state.search_params.to_string());

        if let Some(items) = patch.items {
            state.items = items;
        }
        if let Some(url) = patch.url {
            state.url = url;
        }
        if let Some(params) = patch.search_params {
            state.search_params = params;
        }
        if patch.reload {
            state.version = fresh_version(state.version);
        }

        let invalidated = url_changed || params_changed || patch.reload;
        match patch.loaded {
            Some(true) => self.mark_loaded(),
            Some(false) => self.invalidate(),
            None if invalidated => self.invalidate(),
            None => {}
        }
    }

    pub fn update_with(&mut self, f: impl FnOnce(&Collection) -> CollectionPatch) {
        let patch = f(&self.state);
        self.update(patch);
    }

    /// Issues a fetch when the collection needs one and none is in flight.
    pub fn poll(&mut self) -> Option<FetchTicket> {
        let due = match self.state.status {
            LoadStatus::Idle => true,
            LoadStatus::Error => self.retry == RetryPolicy::OnNextPoll,
            LoadStatus::Loading | LoadStatus::Loaded => false,
        };
        if !due {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(seq);
        self.state.status = LoadStatus::Loading;

        let ticket = FetchTicket {
            seq,
            url: self.state.request_url(),
        };
        debug!(seq, url = %ticket.url, version = self.state.version, "fetching collection");
        Some(ticket)
    }

    /// Lands the result of `ticket`. Responses for superseded tickets are
    /// dropped. Returns whether the result was applied.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Value, ClientError>) -> bool {
        if self.in_flight != Some(ticket.seq) {
            debug!(seq = ticket.seq, url = %ticket.url, "discarding stale response");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(data) => {
                self.state.items = into_items(data);
                self.mark_loaded();
            }
            Err(e) => {
                warn!(seq = ticket.seq, url = %ticket.url, error = %e, "collection fetch failed");
                self.state.status = LoadStatus::Error;
                self.state.error = Some(e.to_string());
            }
        }
        true
    }

    /// Runs one poll/fetch/complete cycle. Returns whether a fetch was made.
    pub fn refresh<F: Fetcher + ?Sized>(&mut self, fetcher: &F) -> bool {
        match self.poll() {
            Some(ticket) => {
                let result = fetcher.fetch(&ticket.url);
                self.complete(&ticket, result);
                true
            }
            None => false,
        }
    }

    fn mark_loaded(&mut self) {
        self.state.status = LoadStatus::Loaded;
        self.state.error = None;
        self.in_flight = None;
    }

    fn invalidate(&mut self) {
        self.state.status = LoadStatus::Idle;
        self.state.error = None;
        self.in_flight = None;
    }
}

fn fresh_version(previous: u64) -> u64 {
    loop {
        let version = rand::random();
        if version != previous {
            return version;
        }
    }
}

fn into_items(data: Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
