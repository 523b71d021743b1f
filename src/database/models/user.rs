use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 用户数据库实体
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
