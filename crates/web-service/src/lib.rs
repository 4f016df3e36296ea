//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use crate::services::{
    Argon2PasswordHasher, ProjectService, ProjectServiceTrait, SprintService, SprintServiceTrait, UserService,
    UserServiceTrait,
};
use color_eyre::Result;
use database::{DatabasePool, ProjectRepository, SprintRepository, UserProjectRepository, UserRepository};
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod test_support;

/// 应用共享状态
///
/// 路由只依赖服务 trait，具体实现在启动时（或测试中）注入
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub sprint_service: Arc<dyn SprintServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    /// 基于 PostgreSQL 仓库组装服务
    pub fn from_pool(pool: DatabasePool, config: &AppConfig) -> Result<Self> {
        let project_repository = Arc::new(ProjectRepository::new(pool.clone()));
        let sprint_repository = Arc::new(SprintRepository::new(pool.clone()));
        let user_repository = Arc::new(UserRepository::new(pool.clone()));
        let user_project_repository = Arc::new(UserProjectRepository::new(pool));

        let hasher = Argon2PasswordHasher::new(config.password_hash_cost)?;

        Ok(Self {
            project_service: Arc::new(ProjectService::new(
                project_repository,
                user_repository.clone(),
                user_project_repository,
            )),
            sprint_service: Arc::new(SprintService::new(sprint_repository)),
            user_service: Arc::new(UserService::new(user_repository, hasher)),
        })
    }
}

/// 启动 Web 服务
pub async fn start_web_service(
    pool: DatabasePool,
    config: Arc<AppConfig>,
    mut shutdown_rx: Receiver<bool>,
) -> Result<()> {
    let shared_state = AppState::from_pool(pool, &config)?;

    let router = routes::create_app_router(shared_state);

    info!("🚀 启动 Web Service 在 {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃同样视为关闭信号
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
