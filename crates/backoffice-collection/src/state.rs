use backoffice_query::QueryParams;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Needs a fetch.
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// The fetched list backing one table view.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub items: Vec<Value>,
    pub status: LoadStatus,
    pub url: String,
    pub search_params: QueryParams,
    pub version: u64,
    pub error: Option<String>,
}

impl Collection {
    pub fn loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    /// `url?search_params`, or the bare url when there are no params.
    pub fn request_url(&self) -> String {
        if self.search_params.is_empty() {
            return self.url.clone();
        }
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{}", self.url, self.search_params)
    }
}
