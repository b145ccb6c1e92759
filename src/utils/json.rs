//! Conversion of BSON documents into plain JSON for API responses.
//!
//! Stored documents carry `ObjectId` and `DateTime` values whose serde form is
//! MongoDB extended JSON (`{"$oid": ...}`). Clients get hex ids and RFC 3339
//! timestamps instead.

use mongodb::bson::{self, Bson, Document};
use serde::Serialize;
use serde_json::Value;

use crate::errors::ApiError;

/// Convert a single BSON value.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.try_to_rfc3339_string()
                .unwrap_or_else(|_| dt.timestamp_millis().to_string()),
        ),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Convert a whole document, preserving field order.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Serialize a model through BSON so ids and dates get the response format.
pub fn model_to_json<T: Serialize>(model: &T) -> Result<Value, ApiError> {
    Ok(document_to_json(bson::to_document(model)?))
}
