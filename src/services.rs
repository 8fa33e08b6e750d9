pub mod dashboard_service;
pub mod ledger_service;
pub mod product_service;
pub mod user_service;

pub use dashboard_service::DashboardService;
pub use ledger_service::LedgerService;
pub use product_service::ProductService;
pub use user_service::UserService;

use crate::common::error::AppError;

pub const MAX_LIST_LIMIT: i64 = 500;

// Limites de listagem aceites: 1..=500
pub(crate) fn validate_limit(limit: i64) -> Result<i64, AppError> {
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(AppError::InvalidLimit);
    }
    Ok(limit)
}
