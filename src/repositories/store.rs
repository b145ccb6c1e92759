//! Untyped document access used by list and populated-detail queries.
//!
//! [`QueryableCollection`] is the seam between the query layer and MongoDB:
//! the query layer only ever counts and fetches through it.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::results::InsertOneResult;
use mongodb::{Collection, Database};

use crate::constants::ERR_MISSING_INSERTED_ID;
use crate::errors::ApiError;
use crate::query::{CollectionQuery, PopulateSpec};

/// A collection that can be counted and queried one page at a time.
#[async_trait]
pub trait QueryableCollection: Send + Sync {
    /// Count documents matching `filter`.
    async fn count_documents(&self, filter: Document) -> Result<u64, ApiError>;

    /// Execute `query` and return the matching page, populated if requested.
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Document>, ApiError>;

    /// Fields never returned, filtered on or sorted by.
    fn hidden_fields(&self) -> &[&'static str] {
        &[]
    }

    /// Find a single document and expand `populate` into it.
    async fn find_one_populated(
        &self,
        filter: Document,
        populate: Option<PopulateSpec>,
    ) -> Result<Option<Document>, ApiError> {
        let query = CollectionQuery {
            filter,
            projection: None,
            sort: doc! {},
            skip: 0,
            limit: 1,
            populate,
        };
        Ok(self.fetch(&query).await?.into_iter().next())
    }

    /// Every document matching `filter`, in insertion order.
    async fn find_all_populated(
        &self,
        filter: Document,
        populate: Option<PopulateSpec>,
    ) -> Result<Vec<Document>, ApiError> {
        let query = CollectionQuery {
            filter,
            projection: None,
            sort: doc! {},
            skip: 0,
            limit: 0,
            populate,
        };
        self.fetch(&query).await
    }
}

/// MongoDB-backed [`QueryableCollection`].
#[derive(Clone)]
pub struct MongoCollection {
    db: Database,
    collection: Collection<Document>,
    hidden_fields: &'static [&'static str],
}

impl MongoCollection {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(name),
            hidden_fields: &[],
        }
    }

    /// Never return these fields, whatever the projection asks for.
    pub fn with_hidden_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.hidden_fields = fields;
        self
    }

    async fn populate(&self, documents: &mut [Document], spec: &PopulateSpec) -> Result<(), ApiError> {
        let keys = join_keys(documents, spec);
        if keys.is_empty() {
            attach_populated(documents, Vec::new(), spec);
            return Ok(());
        }

        debug!(
            "Populating {} from {} for {} key(s)",
            spec.path,
            spec.from,
            keys.len()
        );

        let mut filter = Document::new();
        filter.insert(spec.foreign_field, doc! { "$in": keys });

        let related_collection = self.db.collection::<Document>(spec.from);
        let mut find = related_collection.find(filter);
        if let Some(projection) = spec.projection() {
            find = find.projection(projection);
        }
        let related: Vec<Document> = find.await?.try_collect().await?;

        attach_populated(documents, related, spec);
        Ok(())
    }
}

/// Remove `hidden` fields from a fetched document.
pub fn strip_hidden(document: &mut Document, hidden: &[&str]) {
    for field in hidden {
        document.remove(*field);
    }
}

#[async_trait]
impl QueryableCollection for MongoCollection {
    async fn count_documents(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Document>, ApiError> {
        let mut find = self
            .collection
            .find(query.filter.clone())
            .sort(query.sort.clone())
            .skip(query.skip)
            .limit(query.limit);
        if let Some(projection) = &query.projection {
            find = find.projection(projection.clone());
        }

        let mut documents: Vec<Document> = find.await?.try_collect().await?;

        if let Some(spec) = &query.populate {
            self.populate(&mut documents, spec).await?;
        }
        for document in documents.iter_mut() {
            strip_hidden(document, self.hidden_fields);
        }

        Ok(documents)
    }

    fn hidden_fields(&self) -> &[&'static str] {
        self.hidden_fields
    }
}

/// Id assigned by the server to a freshly inserted document.
pub fn inserted_id(result: InsertOneResult) -> Result<ObjectId, ApiError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| ApiError::internal(ERR_MISSING_INSERTED_ID))
}

/// Distinct join keys found in `documents`.
pub fn join_keys(documents: &[Document], spec: &PopulateSpec) -> Vec<Bson> {
    let mut keys: Vec<Bson> = Vec::new();
    for key in documents.iter().filter_map(|d| d.get(spec.local_field)) {
        if !matches!(key, Bson::Null) && !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}

/// Stitch fetched related documents into their owners.
///
/// A single reference with no match becomes `null`; a reverse reference with
/// no matches becomes an empty array. Documents lacking the join key (for
/// instance because `select` left it out) are left untouched.
pub fn attach_populated(documents: &mut [Document], related: Vec<Document>, spec: &PopulateSpec) {
    for document in documents.iter_mut() {
        let Some(key) = document.get(spec.local_field).cloned() else {
            continue;
        };
        let mut matches = related
            .iter()
            .filter(|r| r.get(spec.foreign_field) == Some(&key))
            .cloned();

        let value = if spec.many {
            Bson::Array(matches.map(Bson::Document).collect())
        } else {
            matches.next().map(Bson::Document).unwrap_or(Bson::Null)
        };
        document.insert(spec.path, value);
    }
}
