//! URL 分类器
//!
//! 对外只暴露 [`UrlClassifier`]，具体是训练好的随机森林还是随机桩，
//! 在进程启动时根据模型文件是否存在决定一次。

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod features;
pub mod forest;
pub mod heuristic;
pub mod model;
pub mod stub;

pub use forest::{ModelLoadError, RandomForest};
pub use model::ModelClassifier;
pub use stub::RandomClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[serde(alias = "benign")]
    Safe,
    Phishing,
    Malicious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

impl Label {
    pub const ALL: [Label; 3] = [Label::Safe, Label::Phishing, Label::Malicious];

    pub fn threat_level(self) -> ThreatLevel {
        match self {
            Label::Safe => ThreatLevel::Low,
            Label::Phishing => ThreatLevel::Medium,
            Label::Malicious => ThreatLevel::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Safe => "safe",
            Label::Phishing => "phishing",
            Label::Malicious => "malicious",
        }
    }
}

impl FromStr for Label {
    type Err = UnknownLabel;

    /// 兼容训练数据集里的类名
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" | "benign" | "good" | "legitimate" => Ok(Label::Safe),
            "phishing" => Ok(Label::Phishing),
            "malicious" | "malware" | "defacement" | "bad" => Ok(Label::Malicious),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ThreatLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub prediction: Label,
    pub threat_level: ThreatLevel,
}

impl From<Label> for Classification {
    fn from(label: Label) -> Self {
        Self {
            prediction: label,
            threat_level: label.threat_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Model,
    Stub,
}

/// 分类不会失败：无法解析的输入按原始字符串提取特征，尽力给出结果
pub trait UrlClassifier: Send + Sync {
    fn classify(&self, url: &str) -> Label;

    fn strategy(&self) -> Strategy;
}

/// 启动时选择分类策略
pub fn select(model_path: &Path) -> Arc<dyn UrlClassifier> {
    match RandomForest::load(model_path) {
        Ok(forest) => {
            tracing::info!(
                "Loaded model from {} ({} trees)",
                model_path.display(),
                forest.tree_count()
            );
            Arc::new(ModelClassifier::new(forest))
        }
        Err(ModelLoadError::NotFound(path)) => {
            tracing::warn!(
                "No model found at {}; using random stub classifier, predictions carry no signal",
                path.display()
            );
            Arc::new(RandomClassifier)
        }
        Err(e) => {
            tracing::error!(
                "Failed to load model from {}: {}; using random stub classifier, predictions carry no signal",
                model_path.display(),
                e
            );
            Arc::new(RandomClassifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threat_level_mapping() {
        assert_eq!(Label::Safe.threat_level(), ThreatLevel::Low);
        assert_eq!(Label::Phishing.threat_level(), ThreatLevel::Medium);
        assert_eq!(Label::Malicious.threat_level(), ThreatLevel::High);
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("benign".parse::<Label>().unwrap(), Label::Safe);
        assert_eq!("Phishing".parse::<Label>().unwrap(), Label::Phishing);
        assert_eq!("defacement".parse::<Label>().unwrap(), Label::Malicious);
        assert!("unknown".parse::<Label>().is_err());
    }

    #[test]
    fn test_label_serde() {
        assert_eq!(serde_json::to_string(&Label::Phishing).unwrap(), "\"phishing\"");
        let label: Label = serde_json::from_str("\"benign\"").unwrap();
        assert_eq!(label, Label::Safe);
        assert!(serde_json::from_str::<Label>("\"evil\"").is_err());
    }

    #[test]
    fn test_missing_model_selects_stub() {
        let classifier = select(Path::new("/nonexistent/cyber-guard/model.json"));
        assert_eq!(classifier.strategy(), Strategy::Stub);
    }
}
