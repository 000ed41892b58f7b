use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        results::{requests::ResultQueryParams, responses::ResultListResponse},
    },
    policy::{ExamRef, ResultView, visibility::VisibilityPolicy},
};

pub async fn list_results(
    service: &ResultService,
    request: &HttpRequest,
    query: ResultQueryParams,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireJWT::extract_principal(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing principal",
        )));
    };
    let storage = service.get_storage(request);

    let records = match storage.list_results().await {
        Ok(records) => records,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list results: {e}"),
                )),
            );
        }
    };

    // join in subject names, linked exams and student classes for the policy
    let subject_names = match storage.subject_name_map().await {
        Ok(map) => map,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to resolve subjects: {e}"),
                )),
            );
        }
    };
    let exams = match storage.list_exams().await {
        Ok(exams) => exams,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to resolve exams: {e}"),
                )),
            );
        }
    };
    let exam_refs: HashMap<i64, ExamRef> = exams
        .iter()
        .map(|e| {
            (
                e.exam.id,
                ExamRef {
                    skill_id: e.exam.skill_id,
                    class_id: e.exam.class_id,
                    subject_id: e.exam.subject_id,
                    status: e.exam.status,
                },
            )
        })
        .collect();

    let student_ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
    let student_classes = match storage.student_class_map(&student_ids).await {
        Ok(map) => map,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to resolve student classes: {e}"),
                )),
            );
        }
    };

    let closed_triples = match storage.list_closed_exam_triples().await {
        Ok(set) => set,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to resolve exam statuses: {e}"),
                )),
            );
        }
    };

    let rows: Vec<ResultView> = records
        .into_iter()
        .map(|record| {
            let linked_exam = record.exam_id.and_then(|id| exam_refs.get(&id).copied());
            let subject_id = record
                .subject_id
                .or_else(|| linked_exam.map(|e| e.subject_id));
            ResultView {
                subject_name: subject_id.and_then(|id| subject_names.get(&id).cloned()),
                student_class_id: student_classes.get(&record.student_id).copied(),
                linked_exam,
                record,
            }
        })
        .collect();

    let policy = VisibilityPolicy::for_principal(&principal);
    let visible = policy.apply(rows, &query, &closed_triples);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ResultListResponse {
            results: visible.rows,
            is_locked: visible.locked,
        },
        "Results retrieved successfully",
    )))
}
