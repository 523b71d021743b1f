use rand::Rng;

use super::{Label, Strategy, UrlClassifier};

/// 没有模型文件时的占位实现，结果均匀随机，不含任何信息
pub struct RandomClassifier;

impl UrlClassifier for RandomClassifier {
    fn classify(&self, url: &str) -> Label {
        let label = Label::ALL[rand::rng().random_range(0..Label::ALL.len())];
        tracing::debug!("Stub classification for {}: {}", url, label);
        label
    }

    fn strategy(&self) -> Strategy {
        Strategy::Stub
    }
}
