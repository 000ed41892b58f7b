use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        results::{entities::ResultRecord, requests::UpdateResultRequest},
        users::entities::UserRole,
    },
    policy::{
        aggregate::Marks,
        gate::{self, GateDecision},
    },
    storage::Storage,
};

pub async fn update_result(
    service: &ResultService,
    request: &HttpRequest,
    result_id: i64,
    update_data: UpdateResultRequest,
) -> ActixResult<HttpResponse> {
    let Some(role) = RequireJWT::extract_user_role(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing principal",
        )));
    };
    let storage = service.get_storage(request);

    let existing = match storage.get_result_by_id(result_id).await {
        Ok(Some(result)) => result,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ResultNotFound,
                "Result not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get result: {e}"),
                )),
            );
        }
    };

    let merged = Marks::new(
        update_data.midterm.unwrap_or(existing.midterm),
        update_data.test.unwrap_or(existing.test),
        update_data.final_exam.unwrap_or(existing.final_exam),
    );
    if let Err(reason) = merged.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            reason.error_code(),
            reason.message(),
        )));
    }

    let governing = match resolve_governing_status(&*storage, &existing).await {
        Ok(status) => status,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to resolve exam: {e}"),
                )),
            );
        }
    };

    if let GateDecision::Deny(reason) = gate::can_update_result(&role, governing) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            reason.error_code(),
            reason.message(),
        )));
    }

    // row lock toggles are an admin repair tool
    if update_data.is_locked.is_some() && role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only admins may change the result lock",
        )));
    }

    match storage.update_result(result_id, update_data).await {
        Ok(Some(result)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Result updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResultNotFound,
            "Result not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update result: {e}"),
            )),
        ),
    }
}

// Governing exam of an existing row: its linked exam, else the exam on file
// for its structured triple
async fn resolve_governing_status(
    storage: &dyn Storage,
    result: &ResultRecord,
) -> crate::errors::Result<crate::models::exams::entities::ExamStatus> {
    let by_exam_id = match result.exam_id {
        Some(exam_id) => storage.get_exam_by_id(exam_id).await?.map(|e| e.status),
        None => None,
    };

    let by_triple = match (result.skill_id, result.class_id, result.subject_id) {
        (Some(skill_id), Some(class_id), Some(subject_id)) => storage
            .find_exam_by_triple(skill_id, class_id, subject_id)
            .await?
            .map(|e| e.status),
        _ => None,
    };

    Ok(gate::governing_status(by_exam_id, by_triple))
}
