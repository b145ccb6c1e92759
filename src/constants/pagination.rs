//! Query-string directives and defaults for list endpoints.

/// Query parameter selecting the returned fields (`select=name,description`).
pub const PARAM_SELECT: &str = "select";

/// Query parameter ordering the results (`sort=-averageCost,name`).
pub const PARAM_SORT: &str = "sort";

/// Query parameter setting the page size.
pub const PARAM_LIMIT: &str = "limit";

/// Query parameter selecting the page.
pub const PARAM_PAGE: &str = "page";

/// Parameters that steer projection, ordering and paging instead of filtering.
pub const RESERVED_PARAMS: [&str; 4] = [PARAM_SELECT, PARAM_SORT, PARAM_LIMIT, PARAM_PAGE];

/// Results per page when `limit` is missing or unparsable.
///
/// Deliberately left at 1 to keep existing clients' paging stable.
pub const DEFAULT_RESULTS_PER_PAGE: u64 = 1;

/// Default starting page number.
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Field used for the default ordering (newest first).
pub const DEFAULT_SORT_FIELD: &str = "createdAt";
