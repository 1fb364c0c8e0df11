use backoffice_query::QueryParams;
use serde_json::Value;

/// Partial replacement merged into a collection by [`CollectionStore::update`].
///
/// [`CollectionStore::update`]: crate::CollectionStore::update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionPatch {
    pub items: Option<Vec<Value>>,
    pub loaded: Option<bool>,
    pub url: Option<String>,
    pub search_params: Option<QueryParams>,
    pub reload: bool,
}

impl CollectionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a refetch without changing url or params.
    pub fn reload() -> Self {
        Self {
            reload: true,
            ..Self::default()
        }
    }

    pub fn items(mut self, items: Vec<Value>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn loaded(mut self, loaded: bool) -> Self {
        self.loaded = Some(loaded);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn search_params(mut self, params: QueryParams) -> Self {
        self.search_params = Some(params);
        self
    }
}
