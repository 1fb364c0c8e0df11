use crate::params::QueryParams;

pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "page_size";
pub const DEFAULT_PAGE: &str = "1";

/// Injects `page` and `page_size` when the caller has not set them.
pub fn with_pagination_defaults(params: &mut QueryParams) {
    for key in [PAGE_PARAM, PAGE_SIZE_PARAM] {
        if !params.has(key) {
            params.append(key, DEFAULT_PAGE);
        }
    }
}
