use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{
    BulkExamStatusRequest, CreateExamRequest, UpdateExamRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ExamService;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

// HTTP handlers
pub async fn list_exams(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, exam_data.into_inner()).await
}

pub async fn update_exam(
    req: HttpRequest,
    exam_id: web::Path<i64>,
    update_data: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(&req, exam_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_exam(req: HttpRequest, exam_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, exam_id.into_inner()).await
}

pub async fn toggle_exam_status(
    req: HttpRequest,
    exam_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .toggle_exam_status(&req, exam_id.into_inner())
        .await
}

pub async fn bulk_set_exam_status(
    req: HttpRequest,
    bulk: web::Json<BulkExamStatusRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .bulk_set_exam_status(&req, bulk.into_inner())
        .await
}

// Route configuration
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_exams)
                            // teachers see their assignments, admins everything
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/status").route(
                    web::patch()
                        .to(bulk_set_exam_status)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{exam_id}/status").route(
                    web::patch()
                        .to(toggle_exam_status)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{exam_id}")
                    .route(
                        web::put()
                            .to(update_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
