//! Pagination metadata for list responses.

use serde::Serialize;
use utoipa::ToSchema;

/// Link to a neighbouring page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 25)]
    pub results_per_page: u64,
}

/// Page count plus links to the previous and next pages where they exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    /// Total number of pages
    #[schema(example = 3)]
    pub pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
}

impl Pagination {
    /// Compute pagination for `page` of size `results_per_page` over `total_documents`.
    ///
    /// Both `page` and `results_per_page` are clamped to at least 1.
    pub fn new(page: u64, results_per_page: u64, total_documents: u64) -> Self {
        let page = page.max(1);
        let results_per_page = results_per_page.max(1);
        let pages = total_documents.div_ceil(results_per_page);

        let link = |page| PageLink {
            page,
            results_per_page,
        };

        Self {
            pages,
            prev: (page > 1).then(|| link(page - 1)),
            next: (page < pages).then(|| link(page + 1)),
        }
    }
}
