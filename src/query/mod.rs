//! Query-string driven filtering, sorting and pagination for list endpoints.

pub mod advanced_results;
pub mod filter;
pub mod pagination;
pub mod params;

pub use advanced_results::{advanced_results, AdvancedResults, CollectionQuery, PopulateSpec};
pub use filter::{FilterOperator, FilterPredicate};
pub use pagination::{PageLink, Pagination};
pub use params::ListQuery;
