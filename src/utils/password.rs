use std::sync::OnceLock;

use bcrypt::{hash, verify};

use crate::error::Result;

pub fn hash_password(password: &str, cost: u32) -> std::result::Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> std::result::Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// bcrypt 计算量大，放到阻塞线程池里执行
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool> {
    let matched = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
    Ok(matched)
}

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash(cost: u32) -> &'static str {
    DUMMY_HASH.get_or_init(|| {
        hash_password("cyber-guard-placeholder-password", cost).unwrap_or_default()
    })
}

/// 启动时预先计算占位哈希，第一次未知用户登录不再多付一次哈希的耗时
pub fn init_dummy_hash(cost: u32) {
    dummy_hash(cost);
}

/// 用户不存在时也跑一次同成本的校验，让两种登录失败耗时接近
pub async fn dummy_verify(password: String, cost: u32) {
    let result =
        tokio::task::spawn_blocking(move || verify_password(&password, dummy_hash(cost))).await;

    if let Ok(Err(e)) = result {
        tracing::debug!("Dummy password verification failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash_password("password123", 4).unwrap();
        assert_ne!(hashed, "password123");
        assert!(verify_password("password123", &hashed).unwrap());
        assert!(!verify_password("password124", &hashed).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("password123", 4).unwrap();
        let second = hash_password("password123", 4).unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hashed = hash_password_blocking("password123".into(), 4).await.unwrap();
        assert!(verify_password_blocking("password123".into(), hashed).await.unwrap());
        dummy_verify("whatever".into(), 4).await;
    }

    #[test]
    fn test_dummy_hash_is_ready_after_init() {
        init_dummy_hash(4);
        let hash = DUMMY_HASH.get().expect("initialized");
        assert!(hash.starts_with("$2"));
        assert!(!verify_password("whatever", hash).unwrap());
    }
}
