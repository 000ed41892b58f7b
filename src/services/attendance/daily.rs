use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::{AttendanceEntry, AttendanceStatus},
        requests::DailyAttendanceQuery,
        responses::DailyAttendanceResponse,
    },
};

// Fetch the sheet for a (class, date). When none was submitted yet the
// response is a fresh all-Present roster (`is_new: true`) so the client can
// start from a sensible default instead of an empty form.
pub async fn get_daily_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: DailyAttendanceQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .find_attendance_by_class_and_date(query.class_id, query.date)
        .await
    {
        Ok(Some(sheet)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DailyAttendanceResponse {
                id: Some(sheet.id),
                class_id: sheet.class_id,
                batch_id: sheet.batch_id,
                date: sheet.date,
                records: sheet.records,
                is_new: false,
            },
            "Attendance retrieved successfully",
        ))),
        Ok(None) => {
            let students = match storage.list_students_by_class(query.class_id).await {
                Ok(students) => students,
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to load roster: {e}"),
                        ),
                    ));
                }
            };

            let batch_id = students.first().map(|s| s.batch_id);
            let records: Vec<AttendanceEntry> = students
                .into_iter()
                .map(|student| AttendanceEntry {
                    student_id: student.id,
                    status: AttendanceStatus::Present,
                })
                .collect();

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DailyAttendanceResponse {
                    id: None,
                    class_id: query.class_id,
                    batch_id,
                    date: query.date,
                    records,
                    is_new: true,
                },
                "No attendance on file, returning a fresh roster",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get attendance: {e}"),
            )),
        ),
    }
}
