mod error;
mod filter;
mod location;
mod operator;
mod pagination;
mod params;
mod sort;

pub use error::FilterError;
pub use filter::{FilterDecl, FilterField, FilterOption, FilterType, decode, encode};
pub use location::{History, MemoryHistory, NoHistory, QueryParamStore};
pub use operator::Operator;
pub use pagination::{DEFAULT_PAGE, PAGE_PARAM, PAGE_SIZE_PARAM, with_pagination_defaults};
pub use params::QueryParams;
pub use sort::{SORT_PARAM, Sort, SortDirection};
