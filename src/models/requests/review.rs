//! Review request models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::validate_not_blank;

/// Request payload for reviewing a bootcamp
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "Please add a title for the review"),
        length(max = 100, message = "Title can not be more than 100 characters")
    )]
    #[schema(example = "Learned a ton!")]
    pub title: String,
    #[validate(custom(function = "validate_not_blank", message = "Please add some text"))]
    pub text: String,
    #[validate(range(min = 1, max = 10, message = "Please add a rating between 1 and 10"))]
    #[schema(example = 8)]
    pub rating: u8,
}

/// Request payload for updating a review; absent fields are left unchanged
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Title can not be more than 100 characters"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10, message = "Please add a rating between 1 and 10"))]
    pub rating: Option<u8>,
}
