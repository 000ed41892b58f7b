use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::{ApiResponse, ErrorCode, exams::requests::BulkExamStatusRequest};

pub async fn toggle_exam_status(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let exam = match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "Exam not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get exam: {e}"),
                )),
            );
        }
    };

    match storage.set_exam_status(exam_id, exam.status.toggled()).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exam,
            "Exam status toggled successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "Exam not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to toggle exam status: {e}"),
            )),
        ),
    }
}

// Best-effort: reports matched/modified counts rather than claiming atomicity
pub async fn bulk_set_exam_status(
    service: &ExamService,
    request: &HttpRequest,
    bulk: BulkExamStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_all_exam_statuses(bulk.status).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            outcome,
            format!("All exams set to {}", bulk.status),
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update exam statuses: {e}"),
            )),
        ),
    }
}
