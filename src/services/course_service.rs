//! Courses offered by bootcamps, and the bootcamp's average cost derived from them.

use std::sync::Arc;

use log::{debug, info};
use mongodb::bson::{self, doc, oid::ObjectId, DateTime};
use mongodb::Database;
use serde_json::Value;

use crate::constants::{CODE_BOOTCAMP_NOT_FOUND, CODE_COURSE_NOT_FOUND};
use crate::errors::ApiError;
use crate::middleware::require_owner_or_admin;
use crate::models::{Claims, Course, CreateCourseRequest, UpdateCourseRequest};
use crate::query::{advanced_results, AdvancedResults};
use crate::repositories::{BootcampRepository, BootcampStore, CourseRepository, CourseStore};
use crate::services::bootcamp_service::BOOTCAMP_SUMMARY;
use crate::utils::document_to_json;

pub struct CourseService {
    courses: Arc<dyn CourseStore>,
    bootcamps: Arc<dyn BootcampStore>,
}

impl CourseService {
    pub fn new(db: &Database) -> Self {
        Self::with_stores(
            Arc::new(CourseRepository::new(db)),
            Arc::new(BootcampRepository::new(db)),
        )
    }

    pub fn with_stores(
        courses: Arc<dyn CourseStore>,
        bootcamps: Arc<dyn BootcampStore>,
    ) -> Self {
        Self { courses, bootcamps }
    }

    pub async fn list(&self, params: &[(String, String)]) -> Result<AdvancedResults, ApiError> {
        advanced_results(self.courses.documents(), params, Some(BOOTCAMP_SUMMARY)).await
    }

    /// Every course of one bootcamp.
    pub async fn list_for_bootcamp(&self, bootcamp_id: &str) -> Result<Vec<Value>, ApiError> {
        let bootcamp_id = ObjectId::parse_str(bootcamp_id)?;
        let courses = self
            .courses
            .documents()
            .find_all_populated(doc! { "bootcamp": bootcamp_id }, Some(BOOTCAMP_SUMMARY))
            .await?;
        Ok(courses.into_iter().map(document_to_json).collect())
    }

    pub async fn get_course(&self, id: &str) -> Result<Value, ApiError> {
        let object_id = ObjectId::parse_str(id)?;
        self.courses
            .documents()
            .find_one_populated(doc! { "_id": object_id }, Some(BOOTCAMP_SUMMARY))
            .await?
            .map(document_to_json)
            .ok_or_else(|| course_not_found(id))
    }

    /// Add a course to a bootcamp the caller owns.
    pub async fn create_course(
        &self,
        claims: &Claims,
        bootcamp_id: &str,
        req: CreateCourseRequest,
    ) -> Result<Course, ApiError> {
        let bootcamp_object_id = ObjectId::parse_str(bootcamp_id)?;
        let bootcamp = self
            .bootcamps
            .find_by_id(bootcamp_object_id)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(
                    CODE_BOOTCAMP_NOT_FOUND,
                    format!("No bootcamp with the id of {}", bootcamp_id),
                )
            })?;
        require_owner_or_admin(claims, &bootcamp, "add a course to")?;

        let course = Course {
            id: None,
            title: req.title.trim().to_string(),
            description: req.description,
            weeks: req.weeks,
            tuition: req.tuition,
            minimum_skill: req.minimum_skill,
            scholarship_available: req.scholarship_available,
            created_at: DateTime::now(),
            bootcamp: bootcamp_object_id,
            user: claims.user_id()?,
        };

        let id = self.courses.insert(&course).await?;
        info!("Course {} added to bootcamp {}", id, bootcamp_object_id);
        self.refresh_average_cost(bootcamp_object_id).await?;

        Ok(Course {
            id: Some(id),
            ..course
        })
    }

    pub async fn update_course(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateCourseRequest,
    ) -> Result<Course, ApiError> {
        let (object_id, course) = self.find(id).await?;
        require_owner_or_admin(claims, &course, "update")?;

        let update = bson::to_document(&req)?;
        if update.is_empty() {
            return Ok(course);
        }

        let updated = self
            .courses
            .update(object_id, update)
            .await?
            .ok_or_else(|| course_not_found(id))?;
        self.refresh_average_cost(updated.bootcamp).await?;
        Ok(updated)
    }

    pub async fn delete_course(&self, claims: &Claims, id: &str) -> Result<(), ApiError> {
        let (object_id, course) = self.find(id).await?;
        require_owner_or_admin(claims, &course, "delete")?;

        self.courses.delete(object_id).await?;
        info!("Course {} deleted", object_id);
        self.refresh_average_cost(course.bootcamp).await
    }

    async fn find(&self, id: &str) -> Result<(ObjectId, Course), ApiError> {
        let object_id = ObjectId::parse_str(id)?;
        let course = self
            .courses
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| course_not_found(id))?;
        Ok((object_id, course))
    }

    /// Store the bootcamp's mean tuition, or clear it when no course is left.
    async fn refresh_average_cost(&self, bootcamp_id: ObjectId) -> Result<(), ApiError> {
        let average = self
            .courses
            .average_tuition(bootcamp_id)
            .await?
            .map(round_up_to_ten);
        debug!("Average cost of bootcamp {} is now {:?}", bootcamp_id, average);
        self.bootcamps
            .set_aggregate(bootcamp_id, "averageCost", average)
            .await
    }
}

fn course_not_found(id: &str) -> ApiError {
    ApiError::not_found(
        CODE_COURSE_NOT_FOUND,
        format!("No course with the id of {}", id),
    )
}

/// Round a cost up to the next multiple of ten.
pub fn round_up_to_ten(cost: f64) -> f64 {
    (cost / 10.0).ceil() * 10.0
}
