/*!
 * JWT authentication middleware.
 *
 * Verifies the bearer token and resolves it into a [`Principal`]: the user
 * account plus the role-specific context the policy layer needs (the student
 * row for students, the assignment sets for teachers). The resolved principal
 * is cached per token and stored in the request extensions.
 *
 * ## Usage
 *
 * ```rust,ignore
 * web::scope("/api")
 *     .wrap(RequireJWT)
 *     .route("/protected", web::get().to(protected_handler))
 * ```
 *
 * Handlers read the principal back with [`RequireJWT::extract_principal`].
 *
 * ## Configuration
 *
 * `JWT_SECRET` must be set; token verification uses it. Tokens are issued by
 * the identity provider, never here.
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{Principal, StudentContext, UserRole, UserStatus};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// Verify the bearer token and resolve it to a Principal
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Principal, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone();

    let cache_key = format!("principal:{token}");

    match cache.get_raw(&cache_key).await {
        CacheResult::Found(json) => match serde_json::from_str::<Principal>(&json) {
            Ok(principal) => return Ok(principal),
            Err(_) => {
                cache.remove(&cache_key).await;
                info!("Failed to deserialize principal from cache");
            }
        },
        _ => {
            debug!("Principal not found in cache");
        }
    };

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let claims = crate::utils::jwt::JwtUtils::decode_token(token).map_err(|err| {
        info!("Failed to decode JWT token: {}", err);
        "Invalid JWT token format".to_string()
    })?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid user ID in JWT".to_string())?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?
        .ok_or_else(|| "User not found".to_string())?;

    if user.status != UserStatus::Active {
        return Err("User is not active".to_string());
    }

    let principal = resolve_principal(&*storage, user_id, user.role).await?;

    let app_config = AppConfig::get();
    if let Ok(principal_json) = serde_json::to_string(&principal) {
        cache
            .insert_raw(cache_key, principal_json, app_config.cache.default_ttl)
            .await;
    }

    Ok(principal)
}

// Attach the role-specific context: students get their student row, teachers
// their assignment sets
async fn resolve_principal(
    storage: &dyn Storage,
    user_id: i64,
    role: UserRole,
) -> Result<Principal, String> {
    let mut principal = Principal {
        user_id,
        role: role.clone(),
        student: None,
        assigned_class_ids: Vec::new(),
        assigned_subject_ids: Vec::new(),
        assigned_skill_ids: Vec::new(),
    };

    match role {
        UserRole::Student => {
            let student = storage
                .get_student_by_user_id(user_id)
                .await
                .map_err(|_| "Failed to resolve student record".to_string())?
                .ok_or_else(|| "No student record for this account".to_string())?;

            principal.student = Some(StudentContext {
                student_id: student.id,
                class_id: student.class_id,
                skill_id: student.skill_id,
                is_locked: student.is_locked,
            });
        }
        UserRole::Teacher => {
            let assignments = storage
                .get_teacher_assignments_by_user_id(user_id)
                .await
                .map_err(|_| "Failed to resolve teacher assignments".to_string())?
                .unwrap_or_default();

            principal.assigned_class_ids = assignments.assigned_class_ids;
            principal.assigned_subject_ids = assignments.assigned_subject_ids;
            principal.assigned_skill_ids = assignments.assigned_skill_ids;
        }
        UserRole::Admin => {}
    }

    Ok(principal)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(principal) => {
                    debug!("JWT authentication successful for user: {}", principal.user_id);
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// Read the resolved principal back from the request extensions. Only
    /// valid on routes wrapped with this middleware.
    pub fn extract_principal(req: &actix_web::HttpRequest) -> Option<Principal> {
        req.extensions().get::<Principal>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Principal>().map(|p| p.user_id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<Principal>().map(|p| p.role.clone())
    }
}
