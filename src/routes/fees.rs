use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::fees::requests::FeeQueryParams;
use crate::services::FeeService;

static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

// HTTP handlers
pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<FeeQueryParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_fees(&req, query.into_inner()).await
}

// Route configuration
pub fn configure_fees_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fees")
            .wrap(middlewares::RequireJWT)
            // every role lists; students are pinned to their own fees
            .service(web::resource("").route(web::get().to(list_fees))),
    );
}
