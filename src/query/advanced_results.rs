//! Filtered, sorted and paginated listing of any collection.
//!
//! [`advanced_results`] turns raw query-string pairs into a [`CollectionQuery`],
//! counts the collection, fetches one page and returns the response envelope.
//! Each call issues exactly one count and one fetch.

use log::debug;
use mongodb::bson::{doc, Document};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::repositories::QueryableCollection;
use crate::utils::document_to_json;

use super::pagination::Pagination;
use super::params::ListQuery;

/// Eager expansion of a related document into each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateSpec {
    /// Field of the result that receives the related document(s)
    pub path: &'static str,
    /// Collection holding the related documents
    pub from: &'static str,
    /// Field of the result holding the join key
    pub local_field: &'static str,
    /// Field of the related documents holding the join key
    pub foreign_field: &'static str,
    /// Fields of the related documents to include (all when empty)
    pub select: &'static [&'static str],
    /// Whether `path` holds an array of related documents
    pub many: bool,
}

impl PopulateSpec {
    /// Replace the id stored in `path` with the referenced document.
    pub const fn reference(
        path: &'static str,
        from: &'static str,
        select: &'static [&'static str],
    ) -> Self {
        Self {
            path,
            from,
            local_field: path,
            foreign_field: "_id",
            select,
            many: false,
        }
    }

    /// Collect into `path` every document of `from` whose `foreign_field` points back here.
    pub const fn referenced_by(
        path: &'static str,
        from: &'static str,
        foreign_field: &'static str,
        select: &'static [&'static str],
    ) -> Self {
        Self {
            path,
            from,
            local_field: "_id",
            foreign_field,
            select,
            many: true,
        }
    }

    /// Projection applied to the related collection.
    pub fn projection(&self) -> Option<Document> {
        if self.select.is_empty() {
            return None;
        }
        let mut projection = Document::new();
        for field in self.select {
            projection.insert(*field, 1);
        }
        projection.insert(self.foreign_field, 1);
        Some(projection)
    }
}

/// A fully described find: filter, projection, order, window and expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    pub filter: Document,
    pub projection: Option<Document>,
    pub sort: Document,
    pub skip: u64,
    pub limit: i64,
    pub populate: Option<PopulateSpec>,
}

impl CollectionQuery {
    /// Translate a parsed list request into a query for one page.
    pub fn from_list_query(list: &ListQuery, populate: Option<PopulateSpec>) -> Self {
        Self {
            filter: list.filter(),
            projection: list.projection(),
            sort: list.sort_document(),
            skip: list.start_index(),
            limit: i64::try_from(list.results_per_page).unwrap_or(i64::MAX),
            populate,
        }
    }
}

/// Envelope returned by every list endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdvancedResults {
    #[schema(example = true)]
    pub success: bool,
    /// Number of documents in the whole collection
    #[schema(example = 12)]
    pub count: u64,
    pub pagination: Pagination,
    /// Documents of the requested page
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
}

/// Run a list request against `collection`.
///
/// `count` reports the size of the whole collection, not the number of
/// documents matching the filters; clients rely on that figure as-is.
pub async fn advanced_results<C>(
    collection: &C,
    params: &[(String, String)],
    populate: Option<PopulateSpec>,
) -> Result<AdvancedResults, ApiError>
where
    C: QueryableCollection + ?Sized,
{
    let mut list = ListQuery::from_pairs(params);
    list.hide_fields(collection.hidden_fields());
    let query = CollectionQuery::from_list_query(&list, populate);
    debug!(
        "Advanced results: filter={:?} sort={:?} skip={} limit={}",
        query.filter, query.sort, query.skip, query.limit
    );

    let total_documents = collection.count_documents(doc! {}).await?;
    let pagination = Pagination::new(list.page, list.results_per_page, total_documents);

    let documents = collection.fetch(&query).await?;

    Ok(AdvancedResults {
        success: true,
        count: total_documents,
        pagination,
        data: documents.into_iter().map(document_to_json).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryCollection;
    use mongodb::bson::{oid::ObjectId, DateTime};

    fn params(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn bootcamps(count: i64) -> Vec<Document> {
        (0..count)
            .map(|i| {
                doc! {
                    "_id": ObjectId::new(),
                    "name": format!("Bootcamp {}", i),
                    "description": format!("Description {}", i),
                    "averageCost": 5000 + i * 1000,
                    "housing": i % 2 == 0,
                    "createdAt": DateTime::from_millis(1_600_000_000_000 + i * 60_000),
                }
            })
            .collect()
    }

    #[actix_web::test]
    async fn test_default_page_is_single_newest_document() {
        let collection = MemoryCollection::new(bootcamps(10));

        let results = advanced_results(&collection, &params(&[]), None)
            .await
            .unwrap();

        assert!(results.success);
        assert_eq!(results.data.len(), 1);
        assert_eq!(results.data[0]["name"], "Bootcamp 9");
        assert_eq!(results.pagination.pages, 10);
        assert!(results.pagination.prev.is_none());
        assert_eq!(results.pagination.next.map(|n| n.page), Some(2));
    }

    #[actix_web::test]
    async fn test_second_page_of_five_over_twelve() {
        let collection = MemoryCollection::new(bootcamps(12));

        let results = advanced_results(&collection, &params(&[("limit", "5"), ("page", "2")]), None)
            .await
            .unwrap();

        assert_eq!(results.count, 12);
        assert_eq!(results.data.len(), 5);

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["pagination"]["pages"], 3);
        assert_eq!(
            json["pagination"]["prev"],
            serde_json::json!({ "page": 1, "resultsPerPage": 5 })
        );
        assert_eq!(
            json["pagination"]["next"],
            serde_json::json!({ "page": 3, "resultsPerPage": 5 })
        );
        // newest first: items 6..=2 of 11..=0
        assert_eq!(json["data"][0]["name"], "Bootcamp 6");
        assert_eq!(json["data"][4]["name"], "Bootcamp 2");
    }

    #[actix_web::test]
    async fn test_lte_filter_applies_and_count_stays_unfiltered() {
        let collection = MemoryCollection::new(bootcamps(10));

        let results = advanced_results(
            &collection,
            &params(&[("averageCost[lte]", "7000"), ("limit", "10")]),
            None,
        )
        .await
        .unwrap();

        assert_eq!(results.data.len(), 3);
        assert!(results
            .data
            .iter()
            .all(|d| d["averageCost"].as_i64().unwrap() <= 7000));
        assert_eq!(results.count, 10);
        assert_eq!(collection.last_count_filter(), Some(doc! {}));
    }

    #[actix_web::test]
    async fn test_select_returns_only_requested_fields() {
        let collection = MemoryCollection::new(bootcamps(3));

        let results = advanced_results(
            &collection,
            &params(&[("select", "name,description"), ("limit", "3")]),
            None,
        )
        .await
        .unwrap();

        for item in &results.data {
            let mut keys: Vec<&String> = item.as_object().unwrap().keys().collect();
            keys.sort();
            assert_eq!(keys, vec!["_id", "description", "name"]);
        }
    }

    #[actix_web::test]
    async fn test_sort_ascending_by_cost() {
        let collection = MemoryCollection::new(bootcamps(4));

        let results = advanced_results(
            &collection,
            &params(&[("sort", "averageCost"), ("limit", "4")]),
            None,
        )
        .await
        .unwrap();

        let costs: Vec<i64> = results
            .data
            .iter()
            .map(|d| d["averageCost"].as_i64().unwrap())
            .collect();
        assert_eq!(costs, vec![5000, 6000, 7000, 8000]);
    }

    #[actix_web::test]
    async fn test_non_numeric_page_falls_back_to_first() {
        let collection = MemoryCollection::new(bootcamps(3));

        let results = advanced_results(&collection, &params(&[("page", "foo")]), None)
            .await
            .unwrap();

        assert_eq!(results.data[0]["name"], "Bootcamp 2");
        assert!(results.pagination.prev.is_none());
    }

    #[actix_web::test]
    async fn test_unknown_field_matches_nothing() {
        let collection = MemoryCollection::new(bootcamps(3));

        let results = advanced_results(&collection, &params(&[("nonexistent", "x")]), None)
            .await
            .unwrap();

        assert!(results.data.is_empty());
        assert_eq!(results.count, 3);
    }

    #[actix_web::test]
    async fn test_numeric_looking_values_match_stored_strings() {
        let collection = MemoryCollection::new(vec![
            doc! { "_id": ObjectId::new(), "title": "2021", "phone": "5551234567", "weeks": 12, "housing": true },
            doc! { "_id": ObjectId::new(), "title": "Other", "phone": "5550000000", "weeks": 8, "housing": false },
        ]);
        let all = [("limit", "10")];

        for (field, value) in [("title", "2021"), ("phone", "5551234567"), ("weeks", "12"), ("housing", "true")] {
            let mut query = all.to_vec();
            query.push((field, value));
            let results = advanced_results(&collection, &params(&query), None)
                .await
                .unwrap();
            assert_eq!(results.data.len(), 1, "{}={}", field, value);
            assert_eq!(results.data[0]["title"], "2021");
        }

        let results = advanced_results(&collection, &params(&[("weeks[gt]", "10")]), None)
            .await
            .unwrap();
        assert_eq!(results.data.len(), 1);
    }

    #[actix_web::test]
    async fn test_hidden_fields_are_not_queryable() {
        let collection = MemoryCollection::new(vec![
            doc! { "_id": ObjectId::new(), "name": "Ann", "role": "user", "password": "$2b$10$aaa" },
            doc! { "_id": ObjectId::new(), "name": "Bob", "role": "admin", "password": "$2b$10$zzz" },
        ])
        .with_hidden_fields(&["password"]);

        let results = advanced_results(
            &collection,
            &params(&[
                ("password[gte]", "$2b$10$m"),
                ("sort", "password"),
                ("select", "name,password"),
                ("limit", "10"),
            ]),
            None,
        )
        .await
        .unwrap();

        assert_eq!(results.data.len(), 2);
        assert!(results.data.iter().all(|user| user.get("password").is_none()));
        let query = collection.last_query().unwrap();
        assert!(!query.filter.contains_key("password"));
        assert!(!query.sort.contains_key("password"));
    }

    #[actix_web::test]
    async fn test_one_count_and_one_fetch_per_call() {
        let collection = MemoryCollection::new(bootcamps(5));

        advanced_results(&collection, &params(&[("limit", "2")]), None)
            .await
            .unwrap();

        assert_eq!(collection.count_calls(), 1);
        assert_eq!(collection.fetch_calls(), 1);
    }

    #[actix_web::test]
    async fn test_populate_spec_is_attached_to_query() {
        const COURSES: PopulateSpec =
            PopulateSpec::referenced_by("courses", "courses", "bootcamp", &["title"]);
        let collection = MemoryCollection::new(bootcamps(2));

        advanced_results(&collection, &params(&[]), Some(COURSES))
            .await
            .unwrap();

        assert_eq!(
            collection.last_query().and_then(|q| q.populate),
            Some(COURSES)
        );
    }

    #[test]
    fn test_populate_projection_keeps_join_key() {
        let spec = PopulateSpec::reference("bootcamp", "bootcamps", &["name", "description"]);
        assert_eq!(
            spec.projection(),
            Some(doc! { "name": 1, "description": 1, "_id": 1 })
        );
        assert_eq!(
            PopulateSpec::reference("user", "users", &[]).projection(),
            None
        );
    }
}
