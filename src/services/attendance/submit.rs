use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        attendance::requests::SubmitDailyAttendanceRequest,
    },
    policy::gate::{self, GateDecision},
};

pub async fn submit_daily_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    submission: SubmitDailyAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let Some(role) = RequireJWT::extract_user_role(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing principal",
        )));
    };
    let storage = service.get_storage(request);

    let existing = match storage
        .find_attendance_by_class_and_date(submission.class_id, submission.date)
        .await
    {
        Ok(sheet) => sheet,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get attendance: {e}"),
                )),
            );
        }
    };

    match existing {
        Some(sheet) => {
            // edits freeze for non-admins once the window has elapsed
            if let GateDecision::Deny(reason) =
                gate::can_mutate_attendance(&role, sheet.created_at, chrono::Utc::now())
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    reason.error_code(),
                    reason.message(),
                )));
            }

            match storage
                .update_attendance_records(sheet.id, submission.records)
                .await
            {
                Ok(Some(sheet)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    sheet,
                    "Attendance updated successfully",
                ))),
                Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceNotFound,
                    "Attendance sheet not found",
                ))),
                Err(e) => Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to update attendance: {e}"),
                    ),
                )),
            }
        }
        None => {
            // first submission; the batch comes from any student of the class
            let batch_id = match storage.list_students_by_class(submission.class_id).await {
                Ok(students) => students.first().map(|s| s.batch_id),
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to load roster: {e}"),
                        ),
                    ));
                }
            };

            match storage
                .create_attendance(
                    submission.class_id,
                    batch_id,
                    submission.date,
                    submission.records,
                )
                .await
            {
                Ok(sheet) => Ok(HttpResponse::Created().json(ApiResponse::success(
                    sheet,
                    "Attendance submitted successfully",
                ))),
                Err(e) => Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to submit attendance: {e}"),
                    ),
                )),
            }
        }
    }
}
