//! 用户注册与登录校验

use sqlx::SqlitePool;

use crate::config::Config;
use crate::database::{UserEntity, UserRepository};
use crate::error::{AppError, Result};
use crate::utils::validation::{validate_email, validate_password, validate_username};
use crate::utils::{dummy_verify, hash_password_blocking, verify_password_blocking};

/// 注册新用户；用户名或邮箱已存在时返回 Duplicate
pub async fn register(
    pool: &SqlitePool,
    config: &Config,
    username: &str,
    email: &str,
    password: &str,
) -> Result<UserEntity> {
    let username = username.trim();
    let email = email.trim().to_lowercase();

    validate_username(username)?;
    validate_email(&email)?;
    validate_password(password)?;

    if UserRepository::username_taken(pool, username).await? {
        return Err(AppError::Duplicate("Username already exists".into()));
    }
    if UserRepository::email_taken(pool, &email).await? {
        return Err(AppError::Duplicate("Email already registered".into()));
    }

    let password_hash = hash_password_blocking(password.to_string(), config.bcrypt_cost).await?;

    let user = insert_user(pool, username, &email, &password_hash).await?;
    tracing::info!("Registered user {} ({})", user.id, user.username);
    Ok(user)
}

/// 并发注册时前面的存在性检查可能都通过，由唯一约束兜底
async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserEntity> {
    match UserRepository::create(pool, username, email, password_hash).await {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            tracing::info!("Concurrent registration conflict for {}", username);
            Err(AppError::Duplicate("Username or email already exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// 校验用户名和密码；用户不存在与密码错误返回同一个错误
pub async fn authenticate(
    pool: &SqlitePool,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<UserEntity> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".into(),
        ));
    }

    let Some(user) = UserRepository::find_by_username(pool, username).await? else {
        dummy_verify(password.to_string(), config.bcrypt_cost).await;
        tracing::warn!("Failed login for unknown username {}", username);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password_blocking(password.to_string(), user.password_hash.clone()).await? {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!("User {} logged in", user.id);
    Ok(user)
}
