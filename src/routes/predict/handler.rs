use axum::{
    extract::{Extension, Json, State},
    response::IntoResponse,
};

use super::model::PredictRequest;
use crate::{
    AppState,
    classifier::{Classification, heuristic},
    database::HistoryRepository,
    error::Result,
    middleware::{Identity, ValidJson},
    utils::validation::validate_url,
};

/// 鉴权可选：任何人都能拿到分类结果，只有带有效令牌的请求才写入历史
#[axum::debug_handler]
pub async fn predict(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidJson(req): ValidJson<PredictRequest>,
) -> Result<impl IntoResponse> {
    let url = validate_url(&req.url)?;
    let result = Classification::from(state.classifier.classify(url));

    if let Some(claims) = identity.claims() {
        // 写历史失败不影响分类结果
        if let Err(e) = HistoryRepository::append(
            &state.pool,
            claims.sub,
            url,
            result.prediction,
            result.threat_level,
        )
        .await
        {
            tracing::error!("Failed to save history for user {}: {:?}", claims.sub, e);
        }
    }

    tracing::info!(
        "predict url={} -> {} ({}), user={:?}",
        url,
        result.prediction,
        result.threat_level,
        identity.claims().map(|c| c.sub)
    );
    Ok(Json(result))
}

/// 公共接口：先走规则筛查，不写历史，忽略令牌
#[axum::debug_handler]
pub async fn predict_public(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<PredictRequest>,
) -> Result<impl IntoResponse> {
    let url = validate_url(&req.url)?;
    let label = heuristic::screen(url).unwrap_or_else(|| state.classifier.classify(url));
    let result = Classification::from(label);

    tracing::info!(
        "predict_public url={} -> {} ({})",
        url,
        result.prediction,
        result.threat_level
    );
    Ok(Json(result))
}
