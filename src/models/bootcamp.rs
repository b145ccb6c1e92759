use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::owned::Owned;

/// Photo assigned to bootcamps that never uploaded one.
pub const DEFAULT_BOOTCAMP_PHOTO: &str = "no-photo.jpg";

/// Career tracks a bootcamp can prepare students for
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    Business,
    Other,
}

/// Bootcamp document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "5d713995b721c3bb38c1f5d0")]
    pub id: Option<ObjectId>,
    #[schema(example = "Devworks Bootcamp")]
    pub name: String,
    #[schema(example = "devworks-bootcamp")]
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[schema(example = "233 Bay State Rd Boston MA 02215")]
    pub address: String,
    pub careers: Vec<Career>,
    /// Mean rating of the bootcamp's reviews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    /// Mean course tuition, rounded up to a multiple of 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<f64>,
    pub photo: String,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime,
    /// Owning publisher
    #[schema(value_type = String)]
    pub user: ObjectId,
}

impl Owned for Bootcamp {
    const KIND: &'static str = "bootcamp";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn owner(&self) -> ObjectId {
        self.user
    }
}
