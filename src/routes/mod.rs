pub mod auth;
pub mod health;
pub mod history;
pub mod predict;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound("Not found")
}
