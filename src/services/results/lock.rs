use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::{ApiResponse, ErrorCode, results::requests::ToggleLockRequest};

pub async fn toggle_student_lock(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
    toggle: ToggleLockRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_student_lock(student_id, toggle.is_locked).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            if toggle.is_locked {
                "Student results locked"
            } else {
                "Student results unlocked"
            },
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to toggle student lock: {e}"),
            )),
        ),
    }
}

// Best-effort: reports matched/modified counts rather than claiming atomicity
pub async fn bulk_toggle_student_lock(
    service: &ResultService,
    request: &HttpRequest,
    toggle: ToggleLockRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_all_student_locks(toggle.is_locked).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            outcome,
            if toggle.is_locked {
                "Student results locked for all students"
            } else {
                "Student results unlocked for all students"
            },
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to toggle student locks: {e}"),
            )),
        ),
    }
}
