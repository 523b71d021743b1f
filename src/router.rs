use axum::{
    Router,
    http::Method,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    AppState,
    middleware::{log_errors, optional_auth, require_auth},
    routes,
};

// 无需鉴权的路由
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/predict_public", post(routes::predict::predict_public))
}

// 鉴权可选：令牌无效时按匿名处理
fn optional_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/predict", post(routes::predict::predict))
        .route_layer(from_fn_with_state(state.clone(), optional_auth))
}

// 必须鉴权
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/auth/verify", get(routes::auth::verify))
        .route(
            "/api/history",
            get(routes::history::get_history).post(routes::history::add_history),
        )
        .route("/api/history/clear", delete(routes::history::clear_history))
        .route("/api/history/{id}", delete(routes::history::delete_history_item))
        .route_layer(from_fn_with_state(state.clone(), require_auth))
}

// 浏览器扩展从任意页面跨域调用
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// 组装完整路由，main 与集成测试共用
pub fn router(state: AppState) -> Router {
    let router = Router::new()
        .merge(public_routes())
        .merge(optional_routes(&state))
        .merge(protected_routes(&state));

    let router = match &state.config.frontend_dir {
        Some(dir) => {
            tracing::info!("Serving frontend files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router.fallback(routes::not_found),
    };

    router
        .layer(from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}
