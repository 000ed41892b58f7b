use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::{
    ApiResponse, ErrorCode,
    results::{requests::ConsolidatedQueryParams, responses::ConsolidatedStudentRow},
};

// Roster for the consolidated mark-entry screen: every active student of the
// (class, skill) with any existing marks for the subject and an unpaid-fee
// flag so the client can grey the row out up front.
pub async fn consolidated_roster(
    service: &ResultService,
    request: &HttpRequest,
    query: ConsolidatedQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let students = match storage
        .list_students_by_class_and_skill(query.class_id, query.skill_id)
        .await
    {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load roster: {e}"),
                )),
            );
        }
    };

    let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    let unpaid = match storage.unpaid_student_ids(&student_ids).await {
        Ok(set) => set,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check fee status: {e}"),
                )),
            );
        }
    };

    let existing = match storage
        .find_results_by_triple(query.skill_id, query.class_id, query.subject_id)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load existing results: {e}"),
                )),
            );
        }
    };
    let by_student: HashMap<i64, _> = existing.into_iter().map(|r| (r.student_id, r)).collect();

    let rows: Vec<ConsolidatedStudentRow> = students
        .into_iter()
        .map(|student| {
            let result = by_student.get(&student.id);
            ConsolidatedStudentRow {
                student_id: student.id,
                name: student.name,
                enrollment_no: student.enrollment_no,
                has_unpaid_fees: unpaid.contains(&student.id),
                midterm: result.map(|r| r.midterm).unwrap_or(0),
                test: result.map(|r| r.test).unwrap_or(0),
                final_exam: result.map(|r| r.final_exam).unwrap_or(0),
                total: result.map(|r| r.total).unwrap_or(0),
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(rows, "Roster retrieved successfully")))
}
