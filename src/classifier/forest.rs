//! 随机森林模型文件的加载与推理
//!
//! 模型文件为 JSON，由训练脚本导出：
//!
//! ```json
//! {
//!   "scaler": { "mean": [..14], "scale": [..14] },
//!   "classes": ["benign", "phishing", "malicious"],
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 13, "threshold": 0.5, "left": 1, "right": 2 },
//!         { "value": [10.0, 1.0, 0.0] },
//!         { "value": [0.0, 3.0, 7.0] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! 节点按先序排列，子节点下标总是大于父节点。
//!
//! 训练脚本输出的是 joblib 文件（model.pkl、scaler.pkl、label_encoder.pkl），
//! 用 `scripts/export_model.py` 转成上面的格式。sklearn 的 `tree_` 数组本身就是先序，
//! `children_left == -1` 的节点导出为叶子，`value` 取每个叶子的类别权重。

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::Label;
use super::features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read model file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct Artifact {
    scaler: Scaler,
    classes: Vec<String>,
    trees: Vec<TreeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
struct Scaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct TreeSpec {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    mean: FeatureVector,
    scale: FeatureVector,
    classes: Vec<Label>,
    trees: Vec<Vec<Node>>,
}

impl RandomForest {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ModelLoadError::NotFound(path.to_path_buf()),
            _ => ModelLoadError::Io(e),
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelLoadError> {
        let artifact: Artifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: Artifact) -> Result<Self, ModelLoadError> {
        let mean = to_vector("scaler.mean", &artifact.scaler.mean)?;
        let mut scale = to_vector("scaler.scale", &artifact.scaler.scale)?;
        // 方差为零的特征，sklearn 同样按 1 处理
        for s in scale.iter_mut() {
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        if artifact.classes.is_empty() {
            return Err(invalid("model declares no classes"));
        }
        let classes = artifact
            .classes
            .iter()
            .map(|c| c.parse::<Label>().map_err(|e| invalid(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        if artifact.trees.is_empty() {
            return Err(invalid("model contains no trees"));
        }
        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| validate_tree(i, tree.nodes, classes.len()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            mean,
            scale,
            classes,
            trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// 各类别的平均概率，顺序与模型里的 classes 相同
    pub fn predict_proba(&self, features: &FeatureVector) -> Vec<f64> {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, value) in scaled.iter_mut().enumerate() {
            *value = (features[i] - self.mean[i]) / self.scale[i];
        }

        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = walk(tree, &scaled);
            let sum: f64 = leaf.iter().sum();
            if sum > 0.0 {
                for (total, weight) in totals.iter_mut().zip(leaf) {
                    *total += weight / sum;
                }
            }
        }

        let count = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= count);
        totals
    }

    pub fn predict(&self, features: &FeatureVector) -> Label {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

fn walk<'a>(nodes: &'a [Node], features: &FeatureVector) -> &'a [f64] {
    let mut index = 0;
    loop {
        match &nodes[index] {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                index = if features[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
            }
            Node::Leaf { value } => return value,
        }
    }
}

fn validate_tree(
    tree: usize,
    nodes: Vec<Node>,
    class_count: usize,
) -> Result<Vec<Node>, ModelLoadError> {
    if nodes.is_empty() {
        return Err(invalid(format!("tree {} has no nodes", tree)));
    }

    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= FEATURE_COUNT {
                    return Err(invalid(format!(
                        "tree {} node {} splits on unknown feature {} (expected < {})",
                        tree, i, feature, FEATURE_COUNT
                    )));
                }
                if !threshold.is_finite() {
                    return Err(invalid(format!(
                        "tree {} node {} has a non-finite threshold on {}",
                        tree, i, FEATURE_NAMES[*feature]
                    )));
                }
                // 子节点必须在后面，保证遍历一定终止
                for child in [*left, *right] {
                    if child <= i || child >= nodes.len() {
                        return Err(invalid(format!(
                            "tree {} node {} has out-of-order child {}",
                            tree, i, child
                        )));
                    }
                }
            }
            Node::Leaf { value } => {
                if value.len() != class_count {
                    return Err(invalid(format!(
                        "tree {} leaf {} has {} weights for {} classes",
                        tree,
                        i,
                        value.len(),
                        class_count
                    )));
                }
                if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return Err(invalid(format!(
                        "tree {} leaf {} has a negative or non-finite weight",
                        tree, i
                    )));
                }
            }
        }
    }

    Ok(nodes)
}

fn to_vector(name: &str, values: &[f64]) -> Result<FeatureVector, ModelLoadError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(invalid(format!("{} contains non-finite values", name)));
    }
    values.try_into().map_err(|_| {
        invalid(format!(
            "{} has {} entries, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        ))
    })
}

fn invalid(msg: impl Into<String>) -> ModelLoadError {
    ModelLoadError::Invalid(msg.into())
}
