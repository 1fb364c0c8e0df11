use serde::Serialize;
use serde_json::Value;

use crate::patch::CollectionPatch;
use crate::store::CollectionStore;

/// Per-row flag marking a selected row.
pub const SELECTED_FLAG: &str = "_selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    None,
    Some,
    All,
}

pub fn is_selected(row: &Value) -> bool {
    row.get(SELECTED_FLAG)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// `None` when nothing is selected, `All` when nothing is unselected.
pub fn rows_selection_state(items: &[Value]) -> SelectionState {
    let selected = items.iter().filter(|row| is_selected(row)).count();
    if selected == 0 {
        SelectionState::None
    } else if selected == items.len() {
        SelectionState::All
    } else {
        SelectionState::Some
    }
}

pub fn selected_items(items: &[Value]) -> impl Iterator<Item = &Value> {
    items.iter().filter(|row| is_selected(row))
}

/// Selects every row, or deselects every row when all are already selected.
pub fn toggle_all(store: &mut CollectionStore) {
    store.update_with(|collection| {
        let select = rows_selection_state(&collection.items) != SelectionState::All;
        let mut items = collection.items.clone();
        for row in &mut items {
            set_selected(row, select);
        }
        CollectionPatch::new().items(items)
    });
}

/// Flips one row. Out-of-range indices are ignored.
pub fn toggle_row(store: &mut CollectionStore, index: usize) {
    if index >= store.items().len() {
        return;
    }
    store.update_with(|collection| {
        let mut items = collection.items.clone();
        let row = &mut items[index];
        let select = !is_selected(row);
        set_selected(row, select);
        CollectionPatch::new().items(items)
    });
}

fn set_selected(row: &mut Value, selected: bool) {
    if let Value::Object(map) = row {
        map.insert(SELECTED_FLAG.to_string(), Value::Bool(selected));
    }
}
