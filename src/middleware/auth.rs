//! 令牌鉴权中间件
//!
//! 路由按需挂载：受保护路由使用 [`require_auth`]，校验失败直接返回 401；
//! 预测接口使用 [`optional_auth`]，令牌缺失或无效时按匿名用户继续处理。
//! 两者共用 [`authorize`] 解析令牌。

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    AppState,
    config::Config,
    error::AppError,
    utils::{Claims, verify_token},
};

/// 可选鉴权路由上的请求身份
#[derive(Debug, Clone)]
pub enum Identity {
    User(Claims),
    Anonymous,
}

impl Identity {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Identity::User(claims) => Some(claims),
            Identity::Anonymous => None,
        }
    }
}

pub fn authorize(headers: &HeaderMap, config: &Config) -> Result<Claims, AppError> {
    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        return Err(AppError::Unauthorized("Missing or malformed Authorization header"));
    };

    Ok(verify_token(bearer.token(), config)?)
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authorize(req.headers(), &state.config).inspect_err(|e| {
        tracing::debug!("Rejected request to {}: {}", req.uri().path(), e);
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

pub async fn optional_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = if req.headers().contains_key(AUTHORIZATION) {
        match authorize(req.headers(), &state.config) {
            Ok(claims) => Identity::User(claims),
            Err(e) => {
                tracing::debug!("Ignoring invalid token on {}: {}", req.uri().path(), e);
                Identity::Anonymous
            }
        }
    } else {
        Identity::Anonymous
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}
