pub mod bulk_submit;
pub mod consolidated;
pub mod create;
pub mod delete;
pub mod list;
pub mod lock;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::{
    BulkSubmitResultsRequest, ConsolidatedQueryParams, CreateResultRequest, ResultQueryParams,
    ToggleLockRequest, UpdateResultRequest,
};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // Role-scoped result listing
    pub async fn list_results(
        &self,
        request: &HttpRequest,
        query: ResultQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_results(self, request, query).await
    }

    pub async fn create_result(
        &self,
        request: &HttpRequest,
        result_data: CreateResultRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_result(self, request, result_data).await
    }

    pub async fn update_result(
        &self,
        request: &HttpRequest,
        result_id: i64,
        update_data: UpdateResultRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_result(self, request, result_id, update_data).await
    }

    pub async fn delete_result(
        &self,
        request: &HttpRequest,
        result_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_result(self, request, result_id).await
    }

    // Roster for consolidated mark entry, with unpaid-fee flags
    pub async fn consolidated_roster(
        &self,
        request: &HttpRequest,
        query: ConsolidatedQueryParams,
    ) -> ActixResult<HttpResponse> {
        consolidated::consolidated_roster(self, request, query).await
    }

    // Bulk mark submission with validation and fee gating
    pub async fn bulk_submit_results(
        &self,
        request: &HttpRequest,
        submission: BulkSubmitResultsRequest,
    ) -> ActixResult<HttpResponse> {
        bulk_submit::bulk_submit_results(self, request, submission).await
    }

    pub async fn toggle_student_lock(
        &self,
        request: &HttpRequest,
        student_id: i64,
        toggle: ToggleLockRequest,
    ) -> ActixResult<HttpResponse> {
        lock::toggle_student_lock(self, request, student_id, toggle).await
    }

    pub async fn bulk_toggle_student_lock(
        &self,
        request: &HttpRequest,
        toggle: ToggleLockRequest,
    ) -> ActixResult<HttpResponse> {
        lock::bulk_toggle_student_lock(self, request, toggle).await
    }
}
