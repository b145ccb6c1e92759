//! Bootcamp request models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Career;
use crate::validators::{validate_not_blank, validate_phone};

/// Request payload for creating a bootcamp
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBootcampRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "Please add a name"),
        length(max = 50, message = "Name can not be more than 50 characters")
    )]
    #[schema(example = "Devworks Bootcamp")]
    pub name: String,
    #[validate(
        custom(function = "validate_not_blank", message = "Please add a description"),
        length(max = 500, message = "Description can not be more than 500 characters")
    )]
    pub description: String,
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    #[schema(example = "https://devworks.com")]
    pub website: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "(111) 111-1111")]
    pub phone: Option<String>,
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_not_blank", message = "Please add an address"))]
    #[schema(example = "233 Bay State Rd Boston MA 02215")]
    pub address: String,
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Vec<Career>,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
}

/// Request payload for updating a bootcamp; absent fields are left unchanged
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBootcampRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "validate_not_blank", message = "Please add a name"),
        length(max = 50, message = "Name can not be more than 50 characters")
    )]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Description can not be more than 500 characters"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Option<Vec<Career>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_assistance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_guarantee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_gi: Option<bool>,
}
