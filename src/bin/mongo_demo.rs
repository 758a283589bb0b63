use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use neo_backend::{
    MongoState,
    config::Config,
    database::{MongoUserRepository, UserRepository},
    routes,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 连接 MongoDB
    let users = MongoUserRepository::connect(&config.mongodb_url, &config.mongodb_database)
        .await
        .expect("Failed to connect to MongoDB");

    // 启动时查询一次演示用户
    match users.find_user_by_user_name("neo").await {
        Ok(Some(user)) => tracing::info!("Found user: {:?}", user),
        Ok(None) => tracing::info!("User neo not found"),
        Err(e) => tracing::error!("Failed to query user neo: {}", e),
    }

    let state = MongoState {
        config: config.clone(),
        users: Arc::new(users),
    };
    let router = routes::mongo_router(state);

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
