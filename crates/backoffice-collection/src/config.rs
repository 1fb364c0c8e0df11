use backoffice_query::{FilterDecl, FilterError, QueryParams};
use serde::{Deserialize, Serialize};

use crate::column::{Column, Sortable};
use crate::error::CollectionError;
use crate::filter::FilterTranslator;
use crate::store::CollectionStore;

/// A table view over one REST resource, as declared in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub id: String,
    pub title: String,
    pub resource: String,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub filters: Vec<FilterDecl>,
    #[serde(default)]
    pub default_query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    pub id: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub sortable: Sortable,
}

fn visible_by_default() -> bool {
    true
}

impl From<&ColumnConfig> for Column {
    fn from(config: &ColumnConfig) -> Self {
        let mut column = Column::new(&config.name, &config.id).sortable(config.sortable);
        column.visible = config.visible;
        column
    }
}

impl ListConfig {
    pub fn from_json(json: &str) -> Result<Self, CollectionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn columns(&self) -> Vec<Column> {
        self.columns.iter().map(Column::from).collect()
    }

    pub fn filter_translator(&self) -> Result<FilterTranslator, FilterError> {
        FilterTranslator::new(self.filters.clone(), self.default_query.as_deref())
    }

    /// A store for `resource`, starting from the default query overlaid with `params`.
    pub fn store(&self, params: &QueryParams) -> CollectionStore {
        let mut initial = self
            .default_query
            .as_deref()
            .map(QueryParams::parse)
            .unwrap_or_default();
        for (key, value) in params.iter() {
            initial.set(key, value);
        }
        CollectionStore::new(&self.resource, Some(initial), None)
    }
}

#[cfg(test)]
mod tests {
    use backoffice_query::{FilterType, Operator};

    use super::*;

    const BUYERS: &str = r#"{
        "id": "buyers",
        "title": "Buyers",
        "resource": "buyers",
        "columns": [
            { "name": "Name", "id": "name", "sortable": "backend" },
            { "name": "City", "id": "address.city" },
            { "name": "Internal", "id": "internal_ref", "visible": false }
        ],
        "filters": [
            { "name": "name", "type": "text", "operator": "contains" },
            { "name": "status", "type": "select" }
        ],
        "default_query": "status=active"
    }"#;

    #[test]
    fn parses_view_json() {
        let config = ListConfig::from_json(BUYERS).unwrap();
        let columns = config.columns();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].sortable, Sortable::Backend);
        assert_eq!(columns[1].sortable, Sortable::None);
        assert!(!columns[2].visible);

        let translator = config.filter_translator().unwrap();
        assert_eq!(translator.decls()[0].filter_type, FilterType::Text);
        assert_eq!(translator.decls()[0].operator, Operator::Contains);
        assert_eq!(translator.field("status").unwrap().value.as_deref(), Some("active"));
    }

    #[test]
    fn store_overlays_live_params_on_defaults() {
        let config = ListConfig::from_json(BUYERS).unwrap();
        let store = config.store(&QueryParams::parse("status=blocked&page=2"));
        assert_eq!(store.state().url, "buyers");
        assert_eq!(
            store.state().search_params.to_string(),
            "status=blocked&page=2"
        );
        assert!(!store.state().loaded());
    }

    #[test]
    fn rejects_unsupported_filter_declaration() {
        let json = r#"{ "id": "t", "title": "T", "resource": "transactions",
            "filters": [{ "name": "amount", "type": "number" }] }"#;
        let config = ListConfig::from_json(json).unwrap();
        assert!(matches!(
            config.filter_translator(),
            Err(FilterError::UnsupportedFilterType { .. })
        ));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            ListConfig::from_json("{"),
            Err(CollectionError::Config(_))
        ));
    }
}
