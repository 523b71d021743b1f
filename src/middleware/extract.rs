use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// 与 `Json` 相同，但解析失败时返回统一的 JSON 错误体
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ValidPath<T>(pub T);
