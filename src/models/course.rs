use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::owned::Owned;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

/// Course document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[schema(example = "Front End Web Development")]
    pub title: String,
    pub description: String,
    /// Duration in weeks
    #[schema(example = 8)]
    pub weeks: u32,
    #[schema(example = 8000.0)]
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime,
    #[schema(value_type = String)]
    pub bootcamp: ObjectId,
    #[schema(value_type = String)]
    pub user: ObjectId,
}

impl Owned for Course {
    const KIND: &'static str = "course";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn owner(&self) -> ObjectId {
        self.user
    }
}
