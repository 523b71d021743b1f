use chrono::Utc;
use sqlx::SqlitePool;

use crate::classifier::{Label, ThreatLevel};
use crate::database::models::history::ScanRecordEntity;

/// 扫描记录存储库，所有操作都限定在所属用户范围内
pub struct HistoryRepository;

impl HistoryRepository {
    pub async fn append(
        pool: &SqlitePool,
        user_id: i64,
        url: &str,
        label: Label,
        threat_level: ThreatLevel,
    ) -> Result<ScanRecordEntity, sqlx::Error> {
        sqlx::query_as::<_, ScanRecordEntity>(
            r#"
            INSERT INTO scan_history (user_id, url, status, threat_level, timestamp)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, url, status, threat_level, timestamp
            "#,
        )
        .bind(user_id)
        .bind(url)
        .bind(label.as_str())
        .bind(threat_level.as_str())
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    /// 最新的在前
    pub async fn list(pool: &SqlitePool, user_id: i64) -> Result<Vec<ScanRecordEntity>, sqlx::Error> {
        sqlx::query_as::<_, ScanRecordEntity>(
            r#"
            SELECT id, user_id, url, status, threat_level, timestamp
            FROM scan_history
            WHERE user_id = ?
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// 记录不存在或不属于该用户时返回 false，不视为错误
    pub async fn delete(pool: &SqlitePool, user_id: i64, record_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scan_history WHERE id = ? AND user_id = ?")
            .bind(record_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 返回删除的条数
    pub async fn clear(pool: &SqlitePool, user_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scan_history WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
