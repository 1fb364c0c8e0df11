use backoffice_query::{
    FilterDecl, FilterError, FilterField, History, Operator, QueryParamStore, QueryParams,
};
use tracing::debug;

use crate::patch::CollectionPatch;
use crate::store::CollectionStore;

/// Keeps a view's filter fields, the collection's params and the address bar in step.
#[derive(Debug, Clone)]
pub struct FilterTranslator {
    decls: Vec<FilterDecl>,
    defaults: QueryParams,
    fields: Vec<FilterField>,
    enabled: bool,
}

impl FilterTranslator {
    /// Fails on the first declaration with an unsupported filter type.
    pub fn new(decls: Vec<FilterDecl>, default_query: Option<&str>) -> Result<Self, FilterError> {
        let defaults = default_query.map(QueryParams::parse).unwrap_or_default();
        let mut translator = Self {
            decls,
            defaults,
            fields: Vec::new(),
            enabled: false,
        };
        translator.fields = translator.from_search_params(&QueryParams::new())?;
        Ok(translator)
    }

    pub fn decls(&self) -> &[FilterDecl] {
        &self.decls
    }

    /// One field per declaration, valued from `params` or, failing that, the
    /// default query.
    pub fn from_search_params(&self, params: &QueryParams) -> Result<Vec<FilterField>, FilterError> {
        self.decls
            .iter()
            .map(|decl| {
                let raw = params
                    .get(&decl.name)
                    .or_else(|| self.defaults.get(&decl.name));
                FilterField::from_raw(decl, raw)
            })
            .collect()
    }

    /// Initialises the fields from the live query params.
    pub fn load<H: History>(&mut self, params: &QueryParamStore<H>) -> Result<(), FilterError> {
        self.fields = self.from_search_params(params.params())?;
        self.enabled = true;
        Ok(())
    }

    /// Encoded non-empty fields, in declaration order.
    pub fn to_search_params(&self) -> QueryParams {
        self.fields
            .iter()
            .filter_map(|field| field.encoded().map(|raw| (field.name.clone(), raw)))
            .collect()
    }

    pub fn filter_data(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn set_filter_data(&mut self, fields: Vec<FilterField>) {
        self.fields = fields;
    }

    pub fn filter_enabled(&self) -> bool {
        self.enabled
    }

    pub fn on_change(&mut self, name: &str, value: impl Into<String>) -> Result<(), FilterError> {
        self.field_mut(name)?.value = Some(value.into());
        Ok(())
    }

    pub fn set_operator(&mut self, name: &str, operator: Operator) -> Result<(), FilterError> {
        self.field_mut(name)?.operator = operator;
        Ok(())
    }

    /// Pushes the encoded fields into the collection, which refetches when they
    /// differ, and rewrites the filter keys in the address bar.
    ///
    /// Params that are not filters, such as `sort_by` or `page`, are kept.
    pub fn apply<H: History>(
        &mut self,
        collection: &mut CollectionStore,
        params: &mut QueryParamStore<H>,
    ) {
        self.enabled = false;
        let encoded = self.to_search_params();
        debug!(filters = %encoded, "applying filters");

        let mut merged = collection.state().search_params.clone();
        self.remove_filter_keys(&mut merged);
        for (key, value) in encoded.iter() {
            merged.append(key, value);
        }
        collection.update(CollectionPatch::new().search_params(merged));

        params.update(|p| {
            self.remove_filter_keys(p);
            for (key, value) in encoded.iter() {
                p.append(key, value);
            }
        });
        self.enabled = true;
    }

    /// Empties the collection's params, drops the filter keys from the address
    /// bar and blanks every field value.
    pub fn clear<H: History>(
        &mut self,
        collection: &mut CollectionStore,
        params: &mut QueryParamStore<H>,
    ) {
        debug!("clearing filters");
        collection.update(CollectionPatch::new().search_params(QueryParams::new()));
        params.update(|p| self.remove_filter_keys(p));
        for field in &mut self.fields {
            field.value = Some(String::new());
        }
    }

    fn remove_filter_keys(&self, params: &mut QueryParams) {
        for decl in &self.decls {
            params.delete(&decl.name);
        }
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FilterField, FilterError> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FilterError::UnknownField(name.to_string()))
    }
}
