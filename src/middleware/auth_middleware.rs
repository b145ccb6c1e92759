//! JWT authentication middleware.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use jsonwebtoken::{decode, DecodingKey, Validation};
use log::{debug, warn};
use std::rc::Rc;

use crate::config::CONFIG;
use crate::constants::ERR_ACCOUNTS_UNAVAILABLE;
use crate::errors::ApiError;
use crate::models::Claims;
use crate::repositories::AccountLookup;

/// Decodes a `Bearer` token when one is sent, reloads the account it was
/// issued for and stores the resulting claims in the request extensions.
///
/// The stored role replaces the one in the token. Requests without a usable
/// token, or whose account is gone, pass through unauthenticated; protected
/// handlers reject them through the `Claims` extractor, so public and
/// protected methods can share a path.
///
/// Needs a `web::Data<dyn AccountLookup>` in the app data.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(bearer_token);

            if let Some(token) = token {
                match decode_claims(token) {
                    Some(claims) => match current_claims(&req, claims).await? {
                        Some(claims) => {
                            req.extensions_mut().insert(claims);
                        }
                        None => warn!("Ignoring token of a removed account on {}", req.path()),
                    },
                    None => debug!("Ignoring invalid bearer token on {}", req.path()),
                }
            }

            service.call(req).await
        })
    }
}

/// `claims` with the role currently stored for its account, or `None` when
/// the account no longer exists.
async fn current_claims(
    req: &ServiceRequest,
    mut claims: Claims,
) -> Result<Option<Claims>, ApiError> {
    let accounts = req
        .app_data::<web::Data<dyn AccountLookup>>()
        .cloned()
        .ok_or_else(|| ApiError::internal(ERR_ACCOUNTS_UNAVAILABLE))?;
    let Ok(user_id) = claims.user_id() else {
        return Ok(None);
    };

    Ok(accounts.current_role(user_id).await?.map(|role| {
        claims.role = role.as_str().to_string();
        claims
    }))
}

/// The token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verify a token's signature and expiry.
pub fn decode_claims(token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(CONFIG.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}
