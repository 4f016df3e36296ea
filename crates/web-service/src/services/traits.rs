//! 服务层 trait 定义
//!
//! 定义服务层的抽象接口，遵循六边形架构的端口适配器模式。
//!
//! 路由层只依赖这些 trait（以 `Arc<dyn ...>` 的形式保存在 [`crate::AppState`] 中），
//! 具体实现由 [`ProjectService`]、[`SprintService`]、[`UserService`] 提供。
//!
//! [`ProjectService`]: crate::services::ProjectService
//! [`SprintService`]: crate::services::SprintService
//! [`UserService`]: crate::services::UserService

use crate::services::error::ServiceResult;
use database::{Project, ProjectCreate, Sprint, SprintCreate, User, UserCreate, UserProject};

/// 项目服务 trait 定义
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync + 'static {
    /// 创建项目
    ///
    /// 创建时间与最后更新时间由服务端写入，成员和迭代列表为空
    async fn create(&self, project: ProjectCreate) -> ServiceResult<Project>;

    /// 查询全部项目，预加载工作空间、成员（含成员的用户与项目）和迭代
    async fn find_all(&self) -> ServiceResult<Vec<Project>>;

    /// 根据 ID 获取项目，不存在时返回 NotFound
    async fn find_one(&self, id: i32) -> ServiceResult<Project>;

    /// 添加项目成员
    ///
    /// # 参数
    /// - `member`: 只需要填写 `user_id` 与 `project_id`
    ///
    /// # 返回值
    /// 返回保存后的成员记录，`user` 与 `project` 为解析后的完整数据。
    /// 项目或用户不存在时返回 NotFound，且不会写入成员记录。
    async fn add_member(&self, member: UserProject) -> ServiceResult<UserProject>;

    /// 获取项目成员列表，项目不存在时返回 NotFound
    async fn get_members(&self, id: i32) -> ServiceResult<Vec<UserProject>>;

    /// 原样保存项目（整体覆盖）
    async fn save(&self, project: Project) -> ServiceResult<Project>;

    /// 软删除项目
    async fn delete(&self, project: Project) -> ServiceResult<Project>;
}

/// 迭代服务 trait 定义
#[async_trait::async_trait]
pub trait SprintServiceTrait: Send + Sync + 'static {
    async fn create(&self, sprint: SprintCreate) -> ServiceResult<Sprint>;

    /// 查询全部迭代，预加载事件
    async fn find_all(&self) -> ServiceResult<Vec<Sprint>>;

    /// 根据 ID 获取迭代，不存在时返回 NotFound
    async fn find_one(&self, id: i32) -> ServiceResult<Sprint>;

    /// 查询某个项目下的迭代
    async fn find_by_project(&self, project_id: i32) -> ServiceResult<Vec<Sprint>>;

    async fn save(&self, sprint: Sprint) -> ServiceResult<Sprint>;

    async fn delete(&self, sprint: Sprint) -> ServiceResult<Sprint>;
}

/// 用户服务 trait 定义
///
/// 注意：和项目/迭代不同，`find_one` 与 `find_one_by_email` 查询不到时返回 `None`
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync + 'static {
    /// 注册用户，名称取邮箱 `@` 之前的部分，密码加盐哈希后保存
    async fn create(&self, user: UserCreate) -> ServiceResult<User>;

    async fn find_all(&self) -> ServiceResult<Vec<User>>;

    async fn find_one(&self, id: i32) -> ServiceResult<Option<User>>;

    async fn find_one_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    /// 刷新最后更新时间后保存
    async fn save(&self, user: User) -> ServiceResult<User>;

    async fn delete(&self, user: User) -> ServiceResult<User>;

    /// 校验明文密码
    fn verify_password(&self, user: &User, password: &str) -> bool;
}
