use anyhow::Context;
use bunny_upload_node::config::{ProcessEnv, Settings};
use bunny_upload_node::{AppState, app};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_timer(LocalTime::rfc_3339())
        .init();

    let env = Arc::new(ProcessEnv);
    let settings = Settings::from_env(env.as_ref());
    let state = AppState::from_settings(&settings, env);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("无法监听 {}", settings.bind_addr))?;

    tracing::info!("服务器运行在 http://{}", settings.bind_addr);
    tracing::info!("临时目录: {}", settings.temp_dir.display());

    axum::serve(listener, app(state)).await?;
    Ok(())
}
