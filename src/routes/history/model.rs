use serde::{Deserialize, Serialize};

use crate::classifier::{Label, ThreatLevel};
use crate::database::ScanRecordEntity;

#[derive(Debug, Deserialize)]
pub struct AddHistoryRequest {
    #[serde(default)]
    pub url: String,
    /// 缺省为 safe
    pub status: Option<Label>,
    /// 缺省按标签推导
    pub threat_level: Option<ThreatLevel>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<ScanRecordEntity>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct AddHistoryResponse {
    pub message: String,
    pub history_item: ScanRecordEntity,
}

#[derive(Debug, Serialize)]
pub struct DeleteHistoryResponse {
    pub message: String,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub message: String,
    pub deleted: u64,
}
