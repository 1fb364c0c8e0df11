use backoffice_query::{QueryParams, SORT_PARAM, Sort, SortDirection};
use serde_json::Value;
use tracing::debug;

use crate::column::{Column, RenderContext, Sortable};
use crate::patch::CollectionPatch;
use crate::state::Collection;
use crate::store::CollectionStore;

/// Clicks in one sort cycle; the next click clears the sort.
const CYCLE_LEN: u8 = 3;

/// Sort state shared by every column of a table.
///
/// `click_count` advances on every header click of a sortable column,
/// whichever column it is, and the fourth click of a cycle clears the sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSort {
    sorted: Option<Sort>,
    click_count: u8,
}

impl TableSort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up a sort already present in `sort_by`.
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            sorted: params.get(SORT_PARAM).and_then(Sort::from_param),
            click_count: 0,
        }
    }

    pub fn sorted(&self) -> Option<&Sort> {
        self.sorted.as_ref()
    }

    pub fn click_count(&self) -> u8 {
        self.click_count
    }

    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.sorted
            .as_ref()
            .filter(|sort| sort.field == column_id)
            .map(|sort| sort.direction)
    }

    pub fn on_header_click(&mut self, column: &Column, store: &mut CollectionStore) {
        if column.sortable == Sortable::None {
            return;
        }

        if self.click_count == CYCLE_LEN {
            self.click_count = 0;
            self.sorted = None;
            debug!(column = %column.id, "clearing sort");
            // A backend sort may be active even when a client column ends the cycle.
            if store.state().search_params.has(SORT_PARAM) {
                store.update_with(|collection| {
                    let mut params = collection.search_params.clone();
                    params.delete(SORT_PARAM);
                    CollectionPatch::new().search_params(params).loaded(false)
                });
            }
            return;
        }

        self.click_count += 1;
        let sort = match &self.sorted {
            Some(current) if current.field == column.id => Sort {
                field: current.field.clone(),
                direction: current.direction.flip(),
            },
            _ => Sort::asc(column.id.clone()),
        };
        debug!(sort = %sort.to_param(), click_count = self.click_count, "sorting table");

        match column.sortable {
            Sortable::Backend => {
                let param = sort.to_param();
                store.update_with(|collection| {
                    let mut params = collection.search_params.clone();
                    params.set(SORT_PARAM, param);
                    CollectionPatch::new().search_params(params).loaded(false)
                });
            }
            Sortable::Client => {
                let direction = sort.direction;
                store.update_with(|collection| {
                    let mut items = collection.items.clone();
                    items.sort_by(|a, b| {
                        let ordering = column.compare(a, b);
                        match direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    });
                    CollectionPatch::new().items(items)
                });
            }
            Sortable::None => {}
        }
        self.sorted = Some(sort);
    }
}

/// Header text with a direction marker on the sorted column.
pub fn header_label(column: &Column, sort: &TableSort) -> String {
    match sort.direction_of(&column.id) {
        Some(SortDirection::Asc) => format!("{} ▲", column.name),
        Some(SortDirection::Desc) => format!("{} ▼", column.name),
        None => column.name.clone(),
    }
}

/// Renders the visible columns of every row.
pub fn render_rows(
    columns: &[Column],
    collection: &Collection,
    custom_data: &Value,
    editing: Option<usize>,
) -> Vec<Vec<String>> {
    collection
        .items
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let ctx = RenderContext {
                row,
                custom_data,
                collection,
                index,
                is_editing: editing == Some(index),
            };
            columns
                .iter()
                .filter(|column| column.visible)
                .map(|column| column.render(&ctx))
                .collect()
        })
        .collect()
}
