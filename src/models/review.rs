use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::owned::Owned;

/// Review document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[schema(example = "Learned a ton!")]
    pub title: String,
    pub text: String,
    /// 1 to 10
    #[schema(example = 8)]
    pub rating: u8,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime,
    #[schema(value_type = String)]
    pub bootcamp: ObjectId,
    #[schema(value_type = String)]
    pub user: ObjectId,
}

impl Owned for Review {
    const KIND: &'static str = "review";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn owner(&self) -> ObjectId {
        self.user
    }
}
