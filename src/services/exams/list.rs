use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, exams::entities::ExamWithSubject, users::entities::UserRole},
};

pub async fn list_exams(service: &ExamService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireJWT::extract_principal(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing principal",
        )));
    };
    let storage = service.get_storage(request);

    let mut exams = match storage.list_exams().await {
        Ok(exams) => exams,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list exams: {e}"),
                )),
            );
        }
    };

    // teachers see only exams inside their assignment sets
    if principal.role == UserRole::Teacher {
        if principal.assigned_class_ids.is_empty() {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                Vec::<ExamWithSubject>::new(),
                "Exams retrieved successfully",
            )));
        }
        exams.retain(|e| {
            principal.assigned_class_ids.contains(&e.exam.class_id)
                && principal.assigned_subject_ids.contains(&e.exam.subject_id)
        });
    }

    // orphan-subject guard: admins keep them so they can assign a subject
    if !principal.is_admin() {
        exams.retain(|e| e.subject_name.as_deref().is_some_and(|n| !n.is_empty()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(exams, "Exams retrieved successfully")))
}
