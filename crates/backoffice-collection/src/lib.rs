mod column;
mod config;
mod error;
mod fetcher;
mod filter;
mod patch;
mod search;
mod selection;
mod state;
mod store;
mod table;

pub use column::{Column, Comparator, RenderContext, Renderer, Sortable, display_value, resolve};
pub use config::{ColumnConfig, ListConfig};
pub use error::CollectionError;
pub use fetcher::Fetcher;
pub use filter::FilterTranslator;
pub use patch::CollectionPatch;
pub use search::{DEFAULT_SEARCH_DELAY, SEARCH_PARAM, SearchDebounce};
pub use selection::{
    SELECTED_FLAG, SelectionState, is_selected, rows_selection_state, selected_items, toggle_all,
    toggle_row,
};
pub use state::{Collection, LoadStatus};
pub use store::{CollectionStore, FetchTicket, RetryPolicy};
pub use table::{TableSort, header_label, render_rows};
