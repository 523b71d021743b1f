use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    /// 训练好的模型文件，不存在时退回随机分类
    pub model_path: PathBuf,
    /// 前端静态文件目录，可选
    pub frontend_dir: Option<PathBuf>,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 从任意变量来源构建配置，`from_env` 传入进程环境
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration_secs = match lookup("JWT_EXPIRATION") {
            Some(raw) => expiration_secs(&raw).ok_or(ConfigError::Invalid {
                name: "JWT_EXPIRATION",
                value: raw,
            })?,
            None => 24 * 3600,
        };

        let bcrypt_cost = parse_var(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Config {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://cyber_guard.db?mode=rwc".into()),
            jwt_secret,
            jwt_expiration_secs,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            server_port: parse_var(&lookup, "SERVER_PORT", 5000)?,
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("model.json")),
            frontend_dir: lookup("FRONTEND_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            bcrypt_cost,
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// 支持 "24h" 与 "24" 两种写法，单位为小时
fn parse_hours(raw: &str) -> Option<u64> {
    raw.trim()
        .trim_end_matches('h')
        .parse::<u64>()
        .ok()
        .filter(|h| *h > 0)
}

/// 换算成秒，结果必须能放进 JWT 的 i64 时间戳
fn expiration_secs(raw: &str) -> Option<u64> {
    parse_hours(raw)?
        .checked_mul(3600)
        .filter(|secs| *secs <= i64::MAX as u64)
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}
