//! Authorization policy shared by the handlers.
//!
//! - `Claims` as a handler argument: the caller must carry a valid token (401)
//! - `Authorized<R>` as a handler argument: the caller's role must be in `R` (403)
//! - `require_owner_or_admin`: the caller must own the resource or be admin (401)
//!
//! Both extractors resolve immediately from the request extensions, so listed
//! before `web::Json` they reject a request before its body is parsed.

use std::marker::PhantomData;
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use log::warn;

use crate::constants::{
    CODE_AUTH_REQUIRED, CODE_FORBIDDEN, CODE_NOT_OWNER, ERR_AUTH_REQUIRED, ROLE_ADMIN,
    ROLE_PUBLISHER, ROLE_USER,
};
use crate::errors::ApiError;
use crate::models::{Claims, Owned};

/// Extension trait for extracting JWT claims from HTTP requests.
pub trait RequestExt {
    /// Claims stored by `AuthMiddleware`, if the request was authenticated.
    fn get_claims(&self) -> Option<Claims>;
}

impl RequestExt for HttpRequest {
    fn get_claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }
}

/// Extract claims from request or return Unauthorized error.
pub fn require_auth(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.get_claims().ok_or_else(|| {
        warn!("Unauthenticated request to {}", req.path());
        ApiError::unauthorized(CODE_AUTH_REQUIRED, ERR_AUTH_REQUIRED)
    })
}

/// Require one of `roles` or return Forbidden.
pub fn authorize(claims: &Claims, roles: &[&str]) -> Result<(), ApiError> {
    if !claims.has_role(roles) {
        warn!("User {} with role {} denied", claims.sub, claims.role);
        return Err(ApiError::forbidden(
            CODE_FORBIDDEN,
            format!(
                "User role {} is not authorized to access this route",
                claims.role
            ),
        ));
    }
    Ok(())
}

impl FromRequest for Claims {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(require_auth(req))
    }
}

/// Roles allowed through an [`Authorized`] extractor.
pub trait RoleSet {
    const ROLES: &'static [&'static str];
}

/// Publishers and admins: bootcamp and course writes.
pub struct Publishers;

impl RoleSet for Publishers {
    const ROLES: &'static [&'static str] = &[ROLE_PUBLISHER, ROLE_ADMIN];
}

/// Users and admins: review writes.
pub struct Reviewers;

impl RoleSet for Reviewers {
    const ROLES: &'static [&'static str] = &[ROLE_USER, ROLE_ADMIN];
}

pub struct Admins;

impl RoleSet for Admins {
    const ROLES: &'static [&'static str] = &[ROLE_ADMIN];
}

/// Claims of a caller whose role is one of `R::ROLES`.
///
/// # Example
/// ```ignore
/// pub async fn create_bootcamp(
///     auth: Authorized<Publishers>,
///     body: web::Json<CreateBootcampRequest>,
/// ) -> Result<HttpResponse, ApiError>
/// ```
pub struct Authorized<R: RoleSet> {
    claims: Claims,
    roles: PhantomData<R>,
}

impl<R: RoleSet> Authorized<R> {
    pub fn into_inner(self) -> Claims {
        self.claims
    }
}

impl<R: RoleSet> Deref for Authorized<R> {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.claims
    }
}

impl<R: RoleSet> FromRequest for Authorized<R> {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let authorized = require_auth(req).and_then(|claims| {
            authorize(&claims, R::ROLES)?;
            Ok(Authorized {
                claims,
                roles: PhantomData,
            })
        });
        ready(authorized)
    }
}

/// Require the caller to own `resource` (admins always pass).
///
/// `action` completes the error message, e.g. "update" or "add a course to".
pub fn require_owner_or_admin<T: Owned>(
    claims: &Claims,
    resource: &T,
    action: &str,
) -> Result<(), ApiError> {
    if claims.is_admin() || claims.is_user(&resource.owner()) {
        return Ok(());
    }

    warn!(
        "User {} attempted to {} {} {} owned by {}",
        claims.sub,
        action,
        T::KIND,
        resource.id_hex(),
        resource.owner()
    );
    Err(ApiError::unauthorized(
        CODE_NOT_OWNER,
        format!(
            "User {} is not authorized to {} {} {}",
            claims.sub,
            action,
            T::KIND,
            resource.id_hex()
        ),
    ))
}
