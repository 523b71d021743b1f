use axum::{
    extract::{Extension, Json, State},
    response::IntoResponse,
};

use super::model::{
    AddHistoryRequest, AddHistoryResponse, ClearHistoryResponse, DeleteHistoryResponse,
    HistoryResponse,
};
use crate::{
    AppState,
    classifier::Label,
    database::HistoryRepository,
    error::{AppError, Result},
    middleware::{ValidJson, ValidPath},
    utils::{Claims, validation::validate_url},
};

#[axum::debug_handler]
pub async fn get_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let history = HistoryRepository::list(&state.pool, claims.sub).await?;

    Ok(Json(HistoryResponse {
        count: history.len(),
        history,
    }))
}

#[axum::debug_handler]
pub async fn add_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidJson(req): ValidJson<AddHistoryRequest>,
) -> Result<impl IntoResponse> {
    let url = validate_url(&req.url)?;
    let label = req.status.unwrap_or(Label::Safe);
    let threat_level = req.threat_level.unwrap_or_else(|| label.threat_level());

    let item = match HistoryRepository::append(&state.pool, claims.sub, url, label, threat_level).await {
        Ok(item) => item,
        // 签名有效但用户已不存在，例如数据库被重置
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            tracing::warn!("Token for missing user {} rejected", claims.sub);
            return Err(AppError::Unauthorized("Invalid token"));
        }
        Err(e) => return Err(e.into()),
    };
    tracing::debug!("User {} added history item {}", claims.sub, item.id);

    Ok(Json(AddHistoryResponse {
        message: "Added to history".into(),
        history_item: item,
    }))
}

/// 删除他人记录或不存在的记录时返回 deleted=false，不报错
#[axum::debug_handler]
pub async fn delete_history_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidPath(id): ValidPath<i64>,
) -> Result<impl IntoResponse> {
    let deleted = HistoryRepository::delete(&state.pool, claims.sub, id).await?;

    let message = if deleted {
        "History item deleted"
    } else {
        "No matching history item"
    };
    Ok(Json(DeleteHistoryResponse {
        message: message.into(),
        deleted,
    }))
}

#[axum::debug_handler]
pub async fn clear_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let deleted = HistoryRepository::clear(&state.pool, claims.sub).await?;
    tracing::info!("User {} cleared {} history items", claims.sub, deleted);

    Ok(Json(ClearHistoryResponse {
        message: "History cleared".into(),
        deleted,
    }))
}
