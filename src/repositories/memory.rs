//! In-memory collection for unit tests.
//!
//! Understands the subset of MongoDB the list queries produce: equality,
//! `$eq`/`$gt`/`$gte`/`$lt`/`$lte`/`$in`, dotted paths, sort, skip, limit and
//! inclusion or exclusion projections. It also backs the typed store traits,
//! so the service rules run without a database.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::{CODE_DUPLICATE_VALUE, ERR_DUPLICATE_VALUE};
use crate::errors::ApiError;
use crate::models::{Bootcamp, Course, Review, Role};
use crate::query::CollectionQuery;

use super::store::{strip_hidden, QueryableCollection};
use super::traits::{AccountLookup, BootcampStore, CourseStore, ReviewStore};

pub struct MemoryCollection {
    documents: Mutex<Vec<Document>>,
    hidden_fields: &'static [&'static str],
    unique_keys: &'static [&'static str],
    count_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    last_count_filter: Mutex<Option<Document>>,
    last_query: Mutex<Option<CollectionQuery>>,
}

impl MemoryCollection {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            hidden_fields: &[],
            unique_keys: &[],
            count_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            last_count_filter: Mutex::new(None),
            last_query: Mutex::new(None),
        }
    }

    pub fn with_hidden_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.hidden_fields = fields;
        self
    }

    /// Reject inserts that repeat an existing document's values for all of `keys`.
    pub fn with_unique_keys(mut self, keys: &'static [&'static str]) -> Self {
        self.unique_keys = keys;
        self
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn last_count_filter(&self) -> Option<Document> {
        self.last_count_filter.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<CollectionQuery> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn push(&self, document: Document) {
        self.documents.lock().unwrap().push(document);
    }

    /// Stored documents matching `filter`, unprojected.
    pub fn find_raw(&self, filter: &Document) -> Vec<Document> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| matches(d, filter))
            .cloned()
            .collect()
    }

    fn insert_model<T: Serialize>(&self, model: &T) -> Result<ObjectId, ApiError> {
        let mut document = bson::to_document(model)?;
        let id = ObjectId::new();
        document.insert("_id", id);

        let mut documents = self.documents.lock().unwrap();
        let duplicate = !self.unique_keys.is_empty()
            && documents.iter().any(|existing| {
                self.unique_keys
                    .iter()
                    .all(|key| existing.get(*key).is_some() && existing.get(*key) == document.get(*key))
            });
        if duplicate {
            return Err(ApiError::bad_request(CODE_DUPLICATE_VALUE, ERR_DUPLICATE_VALUE));
        }

        documents.push(document);
        Ok(id)
    }

    fn find_model<T: DeserializeOwned>(&self, id: ObjectId) -> Result<Option<T>, ApiError> {
        match self.find_raw(&doc! { "_id": id }).into_iter().next() {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    fn update_model<T: DeserializeOwned>(
        &self,
        id: ObjectId,
        update: Document,
    ) -> Result<Option<T>, ApiError> {
        {
            let mut documents = self.documents.lock().unwrap();
            let Some(document) = documents
                .iter_mut()
                .find(|d| d.get_object_id("_id").ok() == Some(id))
            else {
                return Ok(None);
            };
            for (field, value) in update {
                document.insert(field, value);
            }
        }
        self.find_model(id)
    }

    fn set_field(&self, id: ObjectId, field: &str, value: Option<Bson>) {
        let mut documents = self.documents.lock().unwrap();
        if let Some(document) = documents
            .iter_mut()
            .find(|d| d.get_object_id("_id").ok() == Some(id))
        {
            match value {
                Some(value) => {
                    document.insert(field, value);
                }
                None => {
                    document.remove(field);
                }
            }
        }
    }

    fn delete_matching(&self, filter: &Document) -> u64 {
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| !matches(d, filter));
        (before - documents.len()) as u64
    }

    fn average(&self, bootcamp_id: ObjectId, field: &str) -> Option<f64> {
        let values: Vec<f64> = self
            .find_raw(&doc! { "bootcamp": bootcamp_id })
            .iter()
            .filter_map(|d| d.get(field).and_then(as_number))
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

#[async_trait]
impl QueryableCollection for MemoryCollection {
    async fn count_documents(&self, filter: Document) -> Result<u64, ApiError> {
        self.count_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let count = self.find_raw(&filter).len();
        *self.last_count_filter.lock().unwrap() = Some(filter);
        Ok(count as u64)
    }

    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Document>, ApiError> {
        self.fetch_calls.fetch_add(1, AtomicOrdering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        let mut found = self.find_raw(&query.filter);

        found.sort_by(|a, b| {
            for (field, direction) in &query.sort {
                let ordering = compare_bson(lookup(a, field), lookup(b, field));
                let ordering = if direction.as_i32() == Some(-1) {
                    ordering.reverse()
                } else {
                    ordering
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        let limit = match usize::try_from(query.limit) {
            Ok(0) | Err(_) => usize::MAX,
            Ok(limit) => limit,
        };
        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        Ok(found
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|d| {
                let mut document = project(d, query.projection.as_ref());
                strip_hidden(&mut document, self.hidden_fields);
                document
            })
            .collect())
    }

    fn hidden_fields(&self) -> &[&'static str] {
        self.hidden_fields
    }
}

#[async_trait]
impl BootcampStore for MemoryCollection {
    fn documents(&self) -> &dyn QueryableCollection {
        self
    }

    async fn insert(&self, bootcamp: &Bootcamp) -> Result<ObjectId, ApiError> {
        self.insert_model(bootcamp)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Bootcamp>, ApiError> {
        self.find_model(id)
    }

    async fn count_by_owner(&self, user_id: ObjectId) -> Result<u64, ApiError> {
        Ok(self.find_raw(&doc! { "user": user_id }).len() as u64)
    }

    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Bootcamp>, ApiError> {
        self.update_model(id, update)
    }

    async fn set_aggregate(
        &self,
        id: ObjectId,
        field: &str,
        value: Option<f64>,
    ) -> Result<(), ApiError> {
        self.set_field(id, field, value.map(Bson::Double));
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError> {
        self.delete_matching(&doc! { "_id": id });
        Ok(())
    }
}

#[async_trait]
impl CourseStore for MemoryCollection {
    fn documents(&self) -> &dyn QueryableCollection {
        self
    }

    async fn insert(&self, course: &Course) -> Result<ObjectId, ApiError> {
        self.insert_model(course)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Course>, ApiError> {
        self.find_model(id)
    }

    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Course>, ApiError> {
        self.update_model(id, update)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError> {
        self.delete_matching(&doc! { "_id": id });
        Ok(())
    }

    async fn delete_by_bootcamp(&self, bootcamp_id: ObjectId) -> Result<u64, ApiError> {
        Ok(self.delete_matching(&doc! { "bootcamp": bootcamp_id }))
    }

    async fn average_tuition(&self, bootcamp_id: ObjectId) -> Result<Option<f64>, ApiError> {
        Ok(self.average(bootcamp_id, "tuition"))
    }
}

#[async_trait]
impl ReviewStore for MemoryCollection {
    fn documents(&self) -> &dyn QueryableCollection {
        self
    }

    async fn insert(&self, review: &Review) -> Result<ObjectId, ApiError> {
        self.insert_model(review)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Review>, ApiError> {
        self.find_model(id)
    }

    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Review>, ApiError> {
        self.update_model(id, update)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError> {
        self.delete_matching(&doc! { "_id": id });
        Ok(())
    }

    async fn delete_by_bootcamp(&self, bootcamp_id: ObjectId) -> Result<u64, ApiError> {
        Ok(self.delete_matching(&doc! { "bootcamp": bootcamp_id }))
    }

    async fn average_rating(&self, bootcamp_id: ObjectId) -> Result<Option<f64>, ApiError> {
        Ok(self.average(bootcamp_id, "rating"))
    }
}

/// Accounts keyed by id with their stored role.
#[derive(Default)]
pub struct MemoryAccounts {
    roles: Mutex<HashMap<ObjectId, Role>>,
}

impl MemoryAccounts {
    pub fn with_account(self, id: ObjectId, role: Role) -> Self {
        self.roles.lock().unwrap().insert(id, role);
        self
    }
}

#[async_trait]
impl AccountLookup for MemoryAccounts {
    async fn current_role(&self, id: ObjectId) -> Result<Option<Role>, ApiError> {
        Ok(self.roles.lock().unwrap().get(&id).copied())
    }
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Bson::Document(inner) => inner.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, condition)| {
        let value = lookup(document, field);
        match condition {
            Bson::Document(operators) if operators.keys().all(|k| k.starts_with('$')) => operators
                .iter()
                .all(|(op, operand)| matches_operator(value, op, operand)),
            expected => equals(value, expected),
        }
    })
}

fn matches_operator(value: Option<&Bson>, op: &str, operand: &Bson) -> bool {
    let ordering = || value.map(|v| compare_bson(Some(v), Some(operand)));
    match op {
        "$eq" => equals(value, operand),
        "$gt" => ordering() == Some(Ordering::Greater),
        "$gte" => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
        "$lt" => ordering() == Some(Ordering::Less),
        "$lte" => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
        "$in" => match operand {
            Bson::Array(options) => options.iter().any(|o| equals(value, o)),
            _ => false,
        },
        _ => false,
    }
}

fn equals(value: Option<&Bson>, expected: &Bson) -> bool {
    match value {
        Some(Bson::Array(items)) => items
            .iter()
            .any(|item| compare_bson(Some(item), Some(expected)) == Ordering::Equal),
        Some(v) => compare_bson(Some(v), Some(expected)) == Ordering::Equal,
        None => matches!(expected, Bson::Null),
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
                return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            }
            match (a, b) {
                (Bson::String(x), Bson::String(y)) => x.cmp(y),
                (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
                (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
                (Bson::ObjectId(x), Bson::ObjectId(y)) => x.cmp(y),
                _ if a == b => Ordering::Equal,
                _ => Ordering::Less,
            }
        }
    }
}

fn project(document: Document, projection: Option<&Document>) -> Document {
    let Some(projection) = projection else {
        return document;
    };

    let excluding = projection.values().all(|v| as_number(v) == Some(0.0));
    if excluding {
        let mut document = document;
        for field in projection.keys() {
            document.remove(field);
        }
        return document;
    }

    let mut projected = Document::new();
    for (field, value) in document {
        if field == "_id" || projection.contains_key(&field) {
            projected.insert(field, value);
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_operators_and_arrays() {
        let document = doc! { "weeks": 8, "careers": ["Business", "UI/UX"], "location": { "state": "MA" } };

        assert!(matches(&document, &doc! { "weeks": { "$gte": 8_i64, "$lt": 9.5 } }));
        assert!(matches(&document, &doc! { "careers": "Business" }));
        assert!(matches(&document, &doc! { "careers": { "$in": ["Other", "UI/UX"] } }));
        assert!(matches(&document, &doc! { "location.state": "MA" }));
        assert!(!matches(&document, &doc! { "weeks": { "$gt": 8 } }));
        assert!(!matches(&document, &doc! { "missing": "x" }));
    }

    #[test]
    fn test_numbers_and_strings_do_not_compare_equal() {
        let document = doc! { "title": "2021", "weeks": 8 };
        assert!(!matches(&document, &doc! { "title": 2021_i64 }));
        assert!(matches(&document, &doc! { "title": { "$in": [2021_i64, "2021"] } }));
        assert!(!matches(&document, &doc! { "weeks": "8" }));
    }

    #[test]
    fn test_projection_modes() {
        let document = doc! { "_id": 1, "name": "a", "description": "b" };
        assert_eq!(
            project(document.clone(), Some(&doc! { "name": 1 })),
            doc! { "_id": 1, "name": "a" }
        );
        assert_eq!(
            project(document, Some(&doc! { "description": 0 })),
            doc! { "_id": 1, "name": "a" }
        );
    }

    #[actix_web::test]
    async fn test_unique_keys_reject_repeats() {
        let reviews = MemoryCollection::new(Vec::new()).with_unique_keys(&["bootcamp", "user"]);
        let first = doc! { "bootcamp": 1, "user": 2 };

        assert!(reviews.insert_model(&first).is_ok());
        assert!(reviews.insert_model(&doc! { "bootcamp": 1, "user": 3 }).is_ok());

        let err = reviews.insert_model(&first).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
        assert_eq!(reviews.count_documents(doc! {}).await.unwrap(), 2);
    }
}
