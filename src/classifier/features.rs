//! 从 URL 字符串提取固定维度的特征向量
//!
//! 顺序与训练脚本保持一致，改动顺序会让已有模型失效。

use std::sync::OnceLock;

use regex::Regex;

pub const FEATURE_COUNT: usize = 14;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "url_length",
    "num_dots",
    "num_special_chars",
    "has_ip",
    "has_https",
    "num_parts",
    "has_encoding",
    "num_digits",
    "num_uppercase",
    "domain_length",
    "num_subdomains",
    "has_port",
    "query_length",
    "suspicious_words",
];

pub const SUSPICIOUS_WORDS: [&str; 14] = [
    "login", "verify", "secure", "account", "update", "confirm", "bank", "reset", "free", "click",
    "offer", "win", "paypal", "ebay",
];

const SPECIAL_CHARS: [char; 6] = ['@', '?', '=', '&', '-', '_'];
const ENCODING_MARKERS: [&str; 3] = ["base64", "javascript:", "data:"];

pub type FeatureVector = [f64; FEATURE_COUNT];

fn leading_ip() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+").expect("Invalid regex"))
}

fn port() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":\d+").expect("Invalid regex"))
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

pub fn extract_features(url: &str) -> FeatureVector {
    let lower = url.to_lowercase();
    let slash_parts: Vec<&str> = url.split('/').collect();
    let dot_parts = url.split('.').count();

    [
        url.chars().count() as f64,
        url.matches('.').count() as f64,
        url.chars().filter(|c| SPECIAL_CHARS.contains(c)).count() as f64,
        flag(leading_ip().is_match(url)),
        flag(lower.contains("https")),
        slash_parts.len() as f64,
        flag(ENCODING_MARKERS.iter().any(|m| lower.contains(m))),
        url.chars().filter(char::is_ascii_digit).count() as f64,
        url.chars().filter(|c| c.is_uppercase()).count() as f64,
        slash_parts.get(2).map_or(0, |d| d.chars().count()) as f64,
        dot_parts.saturating_sub(2) as f64,
        flag(port().is_match(url)),
        url.split('?').nth(1).map_or(0, |q| q.chars().count()) as f64,
        flag(SUSPICIOUS_WORDS.iter().any(|w| lower.contains(w))),
    ]
}
