use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,         // 用户ID
    pub username: String, // 签发时的用户名
    pub iat: i64,         // 签发时间
    pub exp: i64,         // 过期时间
    pub jti: String,      // 令牌ID，仅用于日志
}

impl Claims {
    pub fn new(user_id: i64, username: &str, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: user_id,
            username: username.to_string(),
            iat: issued_at,
            exp: expires_at,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is malformed or its signature is invalid")]
    Malformed,
}

/// 签发令牌，返回 (token, 过期时间戳)
pub fn generate_token(
    user_id: i64,
    username: &str,
    config: &Config,
) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let expiration = now.saturating_add(config.jwt_expiration().as_secs() as i64);

    let claims = Claims::new(user_id, username, now, expiration);
    let token = encode_claims(&claims, config)?;

    tracing::debug!("Issued token {} for user {}", claims.jti, user_id);
    Ok((token, expiration))
}

pub fn encode_claims(
    claims: &Claims,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// 只校验签名和过期时间，不查库
pub fn verify_token(token: &str, config: &Config) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config(secret: &str) -> Config {
        Config {
            database_url: "sqlite::memory:".into(),
            jwt_secret: secret.into(),
            jwt_expiration_secs: 24 * 3600,
            server_host: "127.0.0.1".into(),
            server_port: 0,
            model_path: PathBuf::from("model.json"),
            frontend_dir: None,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let config = config("test-secret");
        let (token, exp) = generate_token(7, "alice", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token() {
        let config = config("test-secret");
        let now = Utc::now().timestamp();
        let claims = Claims::new(1, "alice", now - 3600, now - 1);
        let token = encode_claims(&claims, &config).unwrap();

        assert_eq!(verify_token(&token, &config), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let (token, _) = generate_token(1, "alice", &config("one")).unwrap();
        assert_eq!(
            verify_token(&token, &config("two")),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let config = config("test-secret");
        assert_eq!(verify_token("invalid.jwt.token", &config), Err(TokenError::Malformed));
        assert_eq!(verify_token("", &config), Err(TokenError::Malformed));
    }

    #[test]
    fn test_tampered_payload_is_malformed() {
        let config = config("test-secret");
        let (token, _) = generate_token(1, "alice", &config).unwrap();
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        parts[1].push('A');
        let tampered = parts.join(".");

        assert_eq!(verify_token(&tampered, &config), Err(TokenError::Malformed));
    }

    #[test]
    fn test_each_token_has_unique_id() {
        let config = config("test-secret");
        let (a, _) = generate_token(1, "alice", &config).unwrap();
        let (b, _) = generate_token(1, "alice", &config).unwrap();
        let a = verify_token(&a, &config).unwrap();
        let b = verify_token(&b, &config).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
