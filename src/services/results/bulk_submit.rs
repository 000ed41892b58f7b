use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResultService;
use crate::{
    models::{
        ApiResponse, ErrorCode,
        results::{requests::BulkSubmitResultsRequest, responses::BulkSubmitResponse},
    },
    policy::{
        aggregate::{Marks, UpsertKey},
        gate::{self, GateDecision},
    },
};

// Consolidated bulk submission: validate every entry up front (one bad entry
// aborts the batch), check the governing exam once, skip fee-gated students
// silently, then upsert each remaining entry on its business key.
pub async fn bulk_submit_results(
    service: &ResultService,
    request: &HttpRequest,
    submission: BulkSubmitResultsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let GateDecision::Deny(reason) = gate::validate_bulk_entries(&submission.results) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            reason.error_code(),
            reason.message(),
        )));
    }

    // one governing exam per batch: all entries share the triple
    let governing = match storage
        .find_exam_by_triple(submission.skill_id, submission.class_id, submission.subject_id)
        .await
    {
        Ok(exam) => gate::governing_status(None, exam.map(|e| e.status)),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to resolve exam: {e}"),
                )),
            );
        }
    };
    if let GateDecision::Deny(reason) = gate::can_create_result(governing) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            reason.error_code(),
            reason.message(),
        )));
    }

    let student_ids: Vec<i64> = submission.results.iter().map(|r| r.student_id).collect();
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

    let (kept, skipped_unpaid) = gate::partition_unpaid(submission.results, &unpaid);
    if !skipped_unpaid.is_empty() {
        info!(
            "Skipping {} fee-gated students in bulk submission",
            skipped_unpaid.len()
        );
    }

    let mut saved = 0usize;
    for entry in &kept {
        let key = UpsertKey {
            student_id: entry.student_id,
            subject_id: submission.subject_id,
            class_id: submission.class_id,
            skill_id: submission.skill_id,
        };
        match storage.upsert_result(key, Marks::from(entry)).await {
            Ok(_) => saved += 1,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to save result for student {}: {e}", entry.student_id),
                    )),
                );
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BulkSubmitResponse {
            saved,
            skipped_unpaid,
        },
        "Results submitted successfully",
    )))
}
