use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::{
    BulkSubmitResultsRequest, ConsolidatedQueryParams, CreateResultRequest, ResultQueryParams,
    ToggleLockRequest, UpdateResultRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ResultService;

static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

// HTTP handlers
pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ResultQueryParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(&req, query.into_inner()).await
}

pub async fn create_result(
    req: HttpRequest,
    result_data: web::Json<CreateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .create_result(&req, result_data.into_inner())
        .await
}

pub async fn update_result(
    req: HttpRequest,
    result_id: web::Path<i64>,
    update_data: web::Json<UpdateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .update_result(&req, result_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_result(
    req: HttpRequest,
    result_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .delete_result(&req, result_id.into_inner())
        .await
}

pub async fn consolidated_roster(
    req: HttpRequest,
    query: web::Query<ConsolidatedQueryParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .consolidated_roster(&req, query.into_inner())
        .await
}

pub async fn bulk_submit_results(
    req: HttpRequest,
    submission: web::Json<BulkSubmitResultsRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .bulk_submit_results(&req, submission.into_inner())
        .await
}

pub async fn toggle_student_lock(
    req: HttpRequest,
    student_id: web::Path<i64>,
    toggle: web::Json<ToggleLockRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .toggle_student_lock(&req, student_id.into_inner(), toggle.into_inner())
        .await
}

pub async fn bulk_toggle_student_lock(
    req: HttpRequest,
    toggle: web::Json<ToggleLockRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .bulk_toggle_student_lock(&req, toggle.into_inner())
        .await
}

// Route configuration
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // every role lists; the visibility policy scopes the rows
                    .route(web::get().to(list_results))
                    .route(
                        web::post()
                            .to(create_result)
                            // teachers enter marks, admins repair
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/consolidated")
                    .route(
                        web::get()
                            .to(consolidated_roster)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::post()
                            .to(bulk_submit_results)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/lock").route(
                    web::patch()
                        .to(bulk_toggle_student_lock)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/lock/{student_id}").route(
                    web::patch()
                        .to(toggle_student_lock)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{result_id}")
                    .route(
                        web::put()
                            .to(update_result)
                            // closed-exam override for admins happens in the gate
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_result)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
