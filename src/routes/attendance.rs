use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{DailyAttendanceQuery, SubmitDailyAttendanceRequest};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// HTTP handlers
pub async fn get_daily_attendance(
    req: HttpRequest,
    query: web::Query<DailyAttendanceQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .get_daily_attendance(&req, query.into_inner())
        .await
}

pub async fn submit_daily_attendance(
    req: HttpRequest,
    submission: web::Json<SubmitDailyAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .submit_daily_attendance(&req, submission.into_inner())
        .await
}

// Route configuration
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/daily")
                    .route(
                        web::get()
                            .to(get_daily_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::post()
                            .to(submit_daily_attendance)
                            // the 24-hour window is enforced in the service
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
