use axum::{
    extract::{Extension, Json, State},
    response::IntoResponse,
};

use super::model::{
    AuthResponse, LoginRequest, LogoutResponse, RegisterRequest, TokenIdentity, VerifyResponse,
};
use crate::{
    AppState,
    database::UserEntity,
    error::Result,
    middleware::ValidJson,
    operations::credentials,
    utils::{Claims, generate_token},
};

fn issue(state: &AppState, user: UserEntity, message: &str) -> Result<Json<AuthResponse>> {
    let (token, expires_at) = generate_token(user.id, &user.username, &state.config)?;
    Ok(Json(AuthResponse {
        message: message.to_string(),
        token,
        expires_at,
        user: user.into(),
    }))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let user = credentials::register(
        &state.pool,
        &state.config,
        &req.username,
        &req.email,
        &req.password,
    )
    .await?;

    issue(&state, user, "User registered successfully")
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user =
        credentials::authenticate(&state.pool, &state.config, &req.username, &req.password).await?;

    issue(&state, user, "Login successful")
}

/// 令牌无状态，服务端不做任何变更，由客户端丢弃令牌
#[axum::debug_handler]
pub async fn logout(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    tracing::info!("User {} logged out (token {})", claims.sub, claims.jti);
    Json(LogoutResponse {
        message: "Logged out successfully".into(),
    })
}

/// 中间件已校验令牌，直接回显令牌中的身份
#[axum::debug_handler]
pub async fn verify(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(VerifyResponse {
        valid: true,
        expires_at: claims.exp,
        user: TokenIdentity {
            id: claims.sub,
            username: claims.username,
        },
    })
}
