use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::user::UserEntity;

/// 用户存储库实现
pub struct UserRepository;

impl UserRepository {
    /// 创建用户，密码必须已经哈希
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        tracing::debug!("Inserted user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// 根据用户名查找用户，大小写不敏感
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    pub async fn username_taken(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn email_taken(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;

    async fn pool() -> SqlitePool {
        let pool = database::create_pool("sqlite::memory:").await.unwrap();
        database::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_duplicate_is_unique_violation() {
        let pool = pool().await;
        let user = UserRepository::create(&pool, "alice", "alice@x.com", "hash")
            .await
            .unwrap();
        assert_eq!(user.username, "alice");

        for (username, email) in [("alice", "other@x.com"), ("Alice", "third@x.com"), ("bob", "ALICE@x.com")] {
            match UserRepository::create(&pool, username, email, "hash").await {
                Err(sqlx::Error::Database(e)) => assert!(e.is_unique_violation()),
                other => panic!("expected unique violation for {}/{}, got {:?}", username, email, other),
            }
        }
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let pool = pool().await;
        UserRepository::create(&pool, "alice", "alice@x.com", "hash")
            .await
            .unwrap();

        assert!(UserRepository::find_by_username(&pool, "ALICE").await.unwrap().is_some());
        assert!(UserRepository::username_taken(&pool, "Alice").await.unwrap());
        assert!(UserRepository::email_taken(&pool, "alice@x.com").await.unwrap());
        assert!(!UserRepository::email_taken(&pool, "bob@x.com").await.unwrap());
    }
}
