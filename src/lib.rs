use std::sync::Arc;

use classifier::UrlClassifier;
use config::Config;
use sqlx::SqlitePool;

pub mod classifier;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod operations;
pub mod router;
pub mod routes;
pub mod utils;

pub use error::{AppError, Result};
pub use router::router;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    /// 启动时选定一次，请求期间不再切换
    pub classifier: Arc<dyn UrlClassifier>,
}
