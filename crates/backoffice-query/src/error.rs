use crate::filter::FilterType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A view declared a filter type that has no query-string encoding.
    #[error("unsupported filter type {filter_type:?} for field '{field}'")]
    UnsupportedFilterType {
        field: String,
        filter_type: FilterType,
    },

    #[error("unknown filter field: {0}")]
    UnknownField(String),
}
