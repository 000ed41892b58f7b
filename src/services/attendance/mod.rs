pub mod daily;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{DailyAttendanceQuery, SubmitDailyAttendanceRequest};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // Existing sheet for a (class, date), or a fresh all-Present roster
    pub async fn get_daily_attendance(
        &self,
        request: &HttpRequest,
        query: DailyAttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        daily::get_daily_attendance(self, request, query).await
    }

    // Create or update the sheet, subject to the edit window
    pub async fn submit_daily_attendance(
        &self,
        request: &HttpRequest,
        submission: SubmitDailyAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_daily_attendance(self, request, submission).await
    }
}
