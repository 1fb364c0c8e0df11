use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::Collection;

/// Inputs handed to a column's render callback.
pub struct RenderContext<'a> {
    pub row: &'a Value,
    pub custom_data: &'a Value,
    pub collection: &'a Collection,
    pub index: usize,
    pub is_editing: bool,
}

pub type Renderer = Arc<dyn Fn(&RenderContext<'_>) -> String + Send + Sync>;
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sortable {
    #[default]
    None,
    /// Reorders the loaded items in memory.
    Client,
    /// Sent to the API as `sort_by`.
    Backend,
}

#[derive(Clone)]
pub struct Column {
    pub name: String,
    pub id: String,
    pub visible: bool,
    pub sortable: Sortable,
    render: Option<Renderer>,
    comparator: Option<Comparator>,
}

impl Column {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            visible: true,
            sortable: Sortable::None,
            render: None,
            comparator: None,
        }
    }

    pub fn sortable(mut self, sortable: Sortable) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_render(
        mut self,
        render: impl Fn(&RenderContext<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn with_comparator(
        mut self,
        comparator: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    pub fn value<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        resolve(row, &self.id)
    }

    /// The render callback's output, or the resolved cell value.
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        match &self.render {
            Some(render) => render(ctx),
            None => self.value(ctx.row).map(display_value).unwrap_or_default(),
        }
    }

    /// Orders two rows by this column, ascending.
    ///
    /// Without a comparator numbers compare numerically, everything else by
    /// its display string, and missing values sort last.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        if let Some(comparator) = &self.comparator {
            return comparator(a, b);
        }
        let a = self.value(a).filter(|v| !v.is_null());
        let b = self.value(b).filter(|v| !v.is_null());
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => display_value(a).cmp(&display_value(b)),
            },
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("visible", &self.visible)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}

/// Looks `id` up in `row`. Dotted ids walk nested objects and array indices;
/// anything else is a direct key.
pub fn resolve<'a>(row: &'a Value, id: &str) -> Option<&'a Value> {
    if !id.contains('.') {
        return row.get(id);
    }
    id.split('.').try_fold(row, |value, segment| match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dotted_ids_walk_nested_values() {
        let row = json!({ "buyer": { "addresses": [{ "city": "Leeds" }] }, "a.b": 1 });
        assert_eq!(resolve(&row, "buyer.addresses.0.city"), Some(&json!("Leeds")));
        assert_eq!(resolve(&row, "buyer.missing"), None);
        assert_eq!(resolve(&row, "buyer"), row.get("buyer"));
        // Dotted ids never fall back to a literal key.
        assert_eq!(resolve(&row, "a.b"), None);
    }

    #[test]
    fn default_compare_orders_numbers_and_strings() {
        let column = Column::new("Amount", "amount");
        assert_eq!(
            column.compare(&json!({ "amount": 9 }), &json!({ "amount": 10 })),
            Ordering::Less
        );
        assert_eq!(
            column.compare(&json!({ "amount": "b" }), &json!({ "amount": "a" })),
            Ordering::Greater
        );
        assert_eq!(
            column.compare(&json!({}), &json!({ "amount": 1 })),
            Ordering::Greater
        );
    }

    #[test]
    fn custom_comparator_wins() {
        let column = Column::new("Name", "name").with_comparator(|a, b| {
            let len = |v: &Value| v["name"].as_str().map_or(0, str::len);
            len(a).cmp(&len(b))
        });
        assert_eq!(
            column.compare(&json!({ "name": "zz" }), &json!({ "name": "aaa" })),
            Ordering::Less
        );
    }
}
