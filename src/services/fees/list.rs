use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, fees::requests::FeeQueryParams, users::entities::UserRole},
};

pub async fn list_fees(
    service: &FeeService,
    request: &HttpRequest,
    query: FeeQueryParams,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireJWT::extract_principal(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing principal",
        )));
    };
    let storage = service.get_storage(request);

    // students are pinned to their own fees regardless of filters
    let restrict_to_student = match principal.role {
        UserRole::Student => match principal.student.as_ref() {
            Some(student) => Some(student.student_id),
            None => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::StudentNotFound,
                    "No student record for this account",
                )));
            }
        },
        _ => None,
    };

    match storage.list_fees(query, restrict_to_student).await {
        Ok(fees) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            fees,
            "Fees retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list fees: {e}"),
            )),
        ),
    }
}
