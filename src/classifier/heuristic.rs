//! 公共预测接口使用的快速规则筛查，命中时不再调用分类器

use std::sync::OnceLock;

use regex::Regex;
use url::{Host, Url};

use super::Label;

const LOCAL_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "0.0.0.0", "::1"];

const SUSPICIOUS_KEYWORDS: [&str; 14] = [
    "login", "signin", "bank", "secure", "account", "verify", "confirm", "update", "reset",
    "paypal", "ebay", "malicious", "phish", "pay",
];

fn executable_download() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\.(exe|msi|scr|bat|cmd|zip)(?:$|[/?])").expect("Invalid regex")
    })
}

fn embedded_ip() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}\b").expect("Invalid regex"))
}

fn hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    match parsed.host()? {
        Host::Domain(domain) => Some(domain.to_ascii_lowercase()),
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}

/// 本地开发地址视为安全，避免拦截本机服务
pub fn is_local(url: &str) -> bool {
    hostname(url).is_some_and(|host| LOCAL_HOSTS.contains(&host.as_str()) || host.ends_with(".local"))
}

/// 返回 None 表示规则无法判断，需要交给分类器
pub fn screen(url: &str) -> Option<Label> {
    if is_local(url) {
        return Some(Label::Safe);
    }

    let lower = url.to_lowercase();
    if SUSPICIOUS_KEYWORDS.iter().any(|k| lower.contains(k))
        || executable_download().is_match(&lower)
        || embedded_ip().is_match(&lower)
    {
        return Some(Label::Malicious);
    }

    None
}
