use color_eyre::Result;
use shared_lib::AppConfig;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;

    // RUST_LOG 优先，否则使用配置中的日志级别
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();

    info!("🚀 启动 agile-backend");

    let pool = database::initialize_database(config.clone()).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let web = tokio::spawn(web_service::start_web_service(pool, config, shutdown_rx));

    shutdown_signal().await;

    // 发送失败说明 Web 服务已经退出，继续等待它的结果即可
    let _ = shutdown_tx.send(true);
    web.await??;

    info!("👋 服务已停止");
    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 收到关闭信号，开始优雅退出");
}
