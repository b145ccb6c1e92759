//! Course request models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::MinimumSkill;
use crate::validators::validate_not_blank;

/// Request payload for adding a course to a bootcamp
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(custom(function = "validate_not_blank", message = "Please add a course title"))]
    #[schema(example = "Front End Web Development")]
    pub title: String,
    #[validate(custom(function = "validate_not_blank", message = "Please add a description"))]
    pub description: String,
    #[validate(range(min = 1, message = "Please add number of weeks"))]
    #[schema(example = 8)]
    pub weeks: u32,
    #[validate(range(min = 0.0, message = "Please add a tuition cost"))]
    #[schema(example = 8000.0)]
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
}

/// Request payload for updating a course; absent fields are left unchanged
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank", message = "Please add a course title"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Please add number of weeks"))]
    pub weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Please add a tuition cost"))]
    pub tuition: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_skill: Option<MinimumSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_available: Option<bool>,
}
