use cyber_guard::{AppState, classifier, config::Config, database, router, utils};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env()?;

    // 数据库连接池与建表
    let pool = database::create_pool(&config.database_url).await?;
    database::run_migrations(&pool).await?;

    // 分类策略只在启动时选择一次
    let classifier = classifier::select(&config.model_path);
    tracing::info!("Classifier strategy: {:?}", classifier.strategy());

    // 占位哈希在开始接收请求前算好
    utils::init_dummy_hash(config.bcrypt_cost);

    let addr = config.server_address();

    let state = AppState {
        pool,
        config,
        classifier,
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
