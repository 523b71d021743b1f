use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// 扫描记录数据库实体
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScanRecordEntity {
    pub id: i64,
    pub user_id: Option<i64>,
    pub url: String,
    /// 分类标签：safe / phishing / malicious
    pub status: String,
    pub threat_level: String,
    pub timestamp: DateTime<Utc>,
}
