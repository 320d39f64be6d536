use serde::Deserialize;
use utoipa::IntoParams;

/// Shared pagination query parameters for list endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    #[param(default = 0, minimum = 0)]
    pub offset: Option<i64>,
}

/// Clamp raw pagination params into a usable (limit, offset) window
pub fn page_window(params: &PaginationParams) -> (u64, u64) {
    let limit = params.limit.unwrap_or(20).clamp(1, 100) as u64;
    let offset = params.offset.unwrap_or(0).max(0) as u64;
    (limit, offset)
}
