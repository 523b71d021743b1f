use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{AppState, database};

/// 健康检查接口
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let connected = database::ping(&state.pool).await;

    Json(json!({
        "status": if connected { "healthy" } else { "unhealthy" },
        "database": if connected { "connected" } else { "disconnected" },
        "classifier": state.classifier.strategy(),
        "timestamp": chrono::Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
