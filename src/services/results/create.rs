use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::{
    models::{ApiResponse, ErrorCode, results::requests::CreateResultRequest},
    policy::{
        aggregate::Marks,
        gate::{self, GateDecision},
    },
};

pub async fn create_result(
    service: &ResultService,
    request: &HttpRequest,
    result_data: CreateResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let marks = Marks::new(result_data.midterm, result_data.test, result_data.final_exam);
    if let Err(reason) = marks.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            reason.error_code(),
            reason.message(),
        )));
    }

    // governing exam: explicit exam_id wins, then the structured triple
    let by_exam_id = match result_data.exam_id {
        Some(exam_id) => match storage.get_exam_by_id(exam_id).await {
            Ok(exam) => exam.map(|e| e.status),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to resolve exam: {e}"),
                    )),
                );
            }
        },
        None => None,
    };

    let by_triple = match (
        result_data.skill_id,
        result_data.class_id,
        result_data.subject_id,
    ) {
        (Some(skill_id), Some(class_id), Some(subject_id)) => {
            match storage
                .find_exam_by_triple(skill_id, class_id, subject_id)
                .await
            {
                Ok(exam) => exam.map(|e| e.status),
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to resolve exam: {e}"),
                        )),
                    );
                }
            }
        }
        _ => None,
    };

    let governing = gate::governing_status(by_exam_id, by_triple);
    if let GateDecision::Deny(reason) = gate::can_create_result(governing) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            reason.error_code(),
            reason.message(),
        )));
    }

    match storage.create_result(result_data).await {
        Ok(result) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(result, "Result created successfully"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create result: {e}"),
            )),
        ),
    }
}
