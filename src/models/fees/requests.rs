use serde::Deserialize;

use super::entities::FeeStatus;

// Fee listing filters, billing-style: month/year/status each applied only
// when supplied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeeQueryParams {
    pub class_id: Option<i64>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub status: Option<FeeStatus>,
}
