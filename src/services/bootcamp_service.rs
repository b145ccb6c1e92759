//! Bootcamp listing, publishing, editing and removal.

use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::{self, oid::ObjectId, DateTime, Document};
use mongodb::Database;

use crate::constants::{
    CODE_BOOTCAMP_LIMIT, CODE_BOOTCAMP_NOT_FOUND, COLLECTION_BOOTCAMPS, COLLECTION_COURSES,
};
use crate::errors::ApiError;
use crate::middleware::require_owner_or_admin;
use crate::models::{
    Bootcamp, Claims, CreateBootcampRequest, UpdateBootcampRequest, DEFAULT_BOOTCAMP_PHOTO,
};
use crate::query::{advanced_results, AdvancedResults, PopulateSpec};
use crate::repositories::{
    BootcampRepository, BootcampStore, CourseRepository, CourseStore, ReviewRepository,
    ReviewStore,
};
use crate::utils::slugify;

/// Each listed bootcamp carries a summary of its courses.
pub const BOOTCAMP_COURSES: PopulateSpec = PopulateSpec::referenced_by(
    "courses",
    COLLECTION_COURSES,
    "bootcamp",
    &["title", "weeks", "tuition"],
);

/// Courses and reviews are returned with their bootcamp's name and description.
pub const BOOTCAMP_SUMMARY: PopulateSpec =
    PopulateSpec::reference("bootcamp", COLLECTION_BOOTCAMPS, &["name", "description"]);

pub struct BootcampService {
    bootcamps: Arc<dyn BootcampStore>,
    courses: Arc<dyn CourseStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl BootcampService {
    pub fn new(db: &Database) -> Self {
        Self::with_stores(
            Arc::new(BootcampRepository::new(db)),
            Arc::new(CourseRepository::new(db)),
            Arc::new(ReviewRepository::new(db)),
        )
    }

    pub fn with_stores(
        bootcamps: Arc<dyn BootcampStore>,
        courses: Arc<dyn CourseStore>,
        reviews: Arc<dyn ReviewStore>,
    ) -> Self {
        Self {
            bootcamps,
            courses,
            reviews,
        }
    }

    pub async fn list(&self, params: &[(String, String)]) -> Result<AdvancedResults, ApiError> {
        advanced_results(self.bootcamps.documents(), params, Some(BOOTCAMP_COURSES)).await
    }

    pub async fn get_bootcamp(&self, id: &str) -> Result<Bootcamp, ApiError> {
        Ok(self.find(id).await?.1)
    }

    async fn find(&self, id: &str) -> Result<(ObjectId, Bootcamp), ApiError> {
        let object_id = ObjectId::parse_str(id)?;
        let bootcamp = self
            .bootcamps
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| bootcamp_not_found(id))?;
        Ok((object_id, bootcamp))
    }

    /// Publish a bootcamp owned by the caller.
    ///
    /// Publishers may own a single bootcamp; admins may add any number.
    pub async fn create_bootcamp(
        &self,
        claims: &Claims,
        req: CreateBootcampRequest,
    ) -> Result<Bootcamp, ApiError> {
        let owner = claims.user_id()?;

        if !claims.is_admin() && self.bootcamps.count_by_owner(owner).await? > 0 {
            warn!("User {} tried to publish a second bootcamp", owner);
            return Err(ApiError::bad_request(
                CODE_BOOTCAMP_LIMIT,
                format!("The user with ID {} has already published a bootcamp", owner),
            ));
        }

        let bootcamp = new_bootcamp(req, owner);
        let id = self.bootcamps.insert(&bootcamp).await?;
        info!("Bootcamp {} published by {}", id, owner);

        Ok(Bootcamp {
            id: Some(id),
            ..bootcamp
        })
    }

    pub async fn update_bootcamp(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateBootcampRequest,
    ) -> Result<Bootcamp, ApiError> {
        let (object_id, bootcamp) = self.find(id).await?;
        require_owner_or_admin(claims, &bootcamp, "update")?;

        let update = bootcamp_update(&req)?;
        if update.is_empty() {
            return Ok(bootcamp);
        }

        self.bootcamps
            .update(object_id, update)
            .await?
            .ok_or_else(|| bootcamp_not_found(id))
    }

    /// Delete a bootcamp together with its courses and reviews.
    pub async fn delete_bootcamp(&self, claims: &Claims, id: &str) -> Result<(), ApiError> {
        let (object_id, bootcamp) = self.find(id).await?;
        require_owner_or_admin(claims, &bootcamp, "delete")?;

        let courses = self.courses.delete_by_bootcamp(object_id).await?;
        let reviews = self.reviews.delete_by_bootcamp(object_id).await?;
        self.bootcamps.delete(object_id).await?;

        info!(
            "Bootcamp {} deleted with {} course(s) and {} review(s)",
            object_id, courses, reviews
        );
        Ok(())
    }
}

fn bootcamp_not_found(id: &str) -> ApiError {
    ApiError::not_found(
        CODE_BOOTCAMP_NOT_FOUND,
        format!("No bootcamp with the id of {}", id),
    )
}

/// A fresh bootcamp document for `req`, owned by `owner`.
pub fn new_bootcamp(req: CreateBootcampRequest, owner: ObjectId) -> Bootcamp {
    let name = req.name.trim().to_string();
    Bootcamp {
        id: None,
        slug: slugify(&name),
        name,
        description: req.description,
        website: req.website,
        phone: req.phone,
        email: req.email,
        address: req.address,
        careers: req.careers,
        average_rating: None,
        average_cost: None,
        photo: DEFAULT_BOOTCAMP_PHOTO.to_string(),
        housing: req.housing,
        job_assistance: req.job_assistance,
        job_guarantee: req.job_guarantee,
        accept_gi: req.accept_gi,
        created_at: DateTime::now(),
        user: owner,
    }
}

/// `$set` document for a partial update; a new name also renews the slug.
pub fn bootcamp_update(req: &UpdateBootcampRequest) -> Result<Document, ApiError> {
    let mut update = bson::to_document(req)?;
    if let Some(name) = &req.name {
        let name = name.trim();
        update.insert("name", name);
        update.insert("slug", slugify(name));
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Career;
    use crate::repositories::MemoryCollection;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;
    use mongodb::bson::doc;

    struct Stores {
        bootcamps: Arc<MemoryCollection>,
        courses: Arc<MemoryCollection>,
        reviews: Arc<MemoryCollection>,
    }

    fn service() -> (BootcampService, Stores) {
        let stores = Stores {
            bootcamps: Arc::new(MemoryCollection::new(Vec::new()).with_unique_keys(&["name"])),
            courses: Arc::new(MemoryCollection::new(Vec::new())),
            reviews: Arc::new(MemoryCollection::new(Vec::new())),
        };
        let service = BootcampService::with_stores(
            stores.bootcamps.clone(),
            stores.courses.clone(),
            stores.reviews.clone(),
        );
        (service, stores)
    }

    fn claims(user: ObjectId, role: &str) -> Claims {
        Claims {
            sub: user.to_hex(),
            email: "someone@example.com".to_string(),
            role: role.to_string(),
            exp: usize::MAX,
            iat: 0,
        }
    }

    fn named(name: &str) -> CreateBootcampRequest {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "description": "Full stack web development",
            "address": "233 Bay State Rd Boston MA 02215",
            "careers": ["Web Development"]
        }))
        .unwrap()
    }

    fn create_request() -> CreateBootcampRequest {
        serde_json::from_value(serde_json::json!({
            "name": " Devworks Bootcamp ",
            "description": "Full stack web development",
            "address": "233 Bay State Rd Boston MA 02215",
            "careers": ["Web Development", "UI/UX"],
            "housing": true
        }))
        .unwrap()
    }

    #[test]
    fn test_new_bootcamp_defaults() {
        let owner = ObjectId::new();
        let bootcamp = new_bootcamp(create_request(), owner);

        assert_eq!(bootcamp.name, "Devworks Bootcamp");
        assert_eq!(bootcamp.slug, "devworks-bootcamp");
        assert_eq!(bootcamp.photo, "no-photo.jpg");
        assert_eq!(bootcamp.careers, vec![Career::WebDevelopment, Career::UiUx]);
        assert!(bootcamp.housing);
        assert!(!bootcamp.job_guarantee);
        assert_eq!(bootcamp.user, owner);
        assert!(bootcamp.average_cost.is_none());
    }

    #[test]
    fn test_stored_field_names_are_camel_case() {
        let document = bson::to_document(&new_bootcamp(create_request(), ObjectId::new())).unwrap();
        assert!(document.contains_key("jobAssistance"));
        assert!(document.contains_key("acceptGi"));
        assert!(document.contains_key("createdAt"));
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("averageCost"));
    }

    #[test]
    fn test_renaming_updates_slug() {
        let req: UpdateBootcampRequest =
            serde_json::from_value(serde_json::json!({ "name": "ModernTech Bootcamp" })).unwrap();
        assert_eq!(
            bootcamp_update(&req).unwrap(),
            doc! { "name": "ModernTech Bootcamp", "slug": "moderntech-bootcamp" }
        );
    }

    #[test]
    fn test_empty_update() {
        let req: UpdateBootcampRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(bootcamp_update(&req).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_publisher_may_publish_one_bootcamp() {
        let (service, _) = service();
        let publisher = claims(ObjectId::new(), "publisher");

        service.create_bootcamp(&publisher, named("Devworks")).await.unwrap();
        let err = service
            .create_bootcamp(&publisher, named("Codemasters"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains(&format!(
            "The user with ID {} has already published a bootcamp",
            publisher.sub
        )));

        let other = claims(ObjectId::new(), "publisher");
        assert!(service.create_bootcamp(&other, named("ModernTech")).await.is_ok());
    }

    #[actix_web::test]
    async fn test_admin_may_publish_many_bootcamps() {
        let (service, stores) = service();
        let admin_id = ObjectId::new();
        let admin = claims(admin_id, "admin");

        service.create_bootcamp(&admin, named("Devworks")).await.unwrap();
        service.create_bootcamp(&admin, named("Codemasters")).await.unwrap();

        assert_eq!(stores.bootcamps.find_raw(&doc! { "user": admin_id }).len(), 2);
    }

    #[actix_web::test]
    async fn test_duplicate_name_is_rejected() {
        let (service, _) = service();
        service
            .create_bootcamp(&claims(ObjectId::new(), "publisher"), named("Devworks"))
            .await
            .unwrap();
        let err = service
            .create_bootcamp(&claims(ObjectId::new(), "publisher"), named("Devworks"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Duplicate value entered"));
    }

    #[actix_web::test]
    async fn test_delete_removes_courses_and_reviews() {
        let (service, stores) = service();
        let owner = claims(ObjectId::new(), "publisher");
        let doomed = service
            .create_bootcamp(&owner, named("Devworks"))
            .await
            .unwrap()
            .id
            .unwrap();
        let kept = service
            .create_bootcamp(&claims(ObjectId::new(), "publisher"), named("ModernTech"))
            .await
            .unwrap()
            .id
            .unwrap();
        for bootcamp in [doomed, doomed, kept] {
            stores.courses.push(doc! { "_id": ObjectId::new(), "bootcamp": bootcamp });
            stores.reviews.push(doc! { "_id": ObjectId::new(), "bootcamp": bootcamp });
        }

        service.delete_bootcamp(&owner, &doomed.to_hex()).await.unwrap();

        assert!(stores.courses.find_raw(&doc! { "bootcamp": doomed }).is_empty());
        assert!(stores.reviews.find_raw(&doc! { "bootcamp": doomed }).is_empty());
        assert_eq!(stores.courses.find_raw(&doc! { "bootcamp": kept }).len(), 1);
        assert_eq!(stores.reviews.find_raw(&doc! { "bootcamp": kept }).len(), 1);

        let err = service.get_bootcamp(&doomed.to_hex()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_only_the_owner_may_delete() {
        let (service, stores) = service();
        let bootcamp = service
            .create_bootcamp(&claims(ObjectId::new(), "publisher"), named("Devworks"))
            .await
            .unwrap()
            .id
            .unwrap();
        stores.courses.push(doc! { "_id": ObjectId::new(), "bootcamp": bootcamp });

        let err = service
            .delete_bootcamp(&claims(ObjectId::new(), "publisher"), &bootcamp.to_hex())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(stores.courses.find_raw(&doc! { "bootcamp": bootcamp }).len(), 1);
        assert!(service.get_bootcamp(&bootcamp.to_hex()).await.is_ok());
    }

    #[actix_web::test]
    async fn test_rename_renews_slug() {
        let (service, _) = service();
        let owner = claims(ObjectId::new(), "publisher");
        let id = service
            .create_bootcamp(&owner, named("Devworks"))
            .await
            .unwrap()
            .id
            .unwrap();
        let req: UpdateBootcampRequest =
            serde_json::from_value(serde_json::json!({ "name": "Devcentral Bootcamp" })).unwrap();

        let updated = service
            .update_bootcamp(&owner, &id.to_hex(), req)
            .await
            .unwrap();
        assert_eq!(updated.slug, "devcentral-bootcamp");
    }
}
