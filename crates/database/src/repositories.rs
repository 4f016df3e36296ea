//! 数据库仓库模块
//!
//! 这里定义数据库操作的Repository层

pub mod project;
pub mod sprint;
pub mod traits;
pub mod user;
pub mod user_project;

// 重新导出具体的类型
pub use project::ProjectRepository;
pub use sprint::SprintRepository;
pub use traits::RepositoryTrait;
pub use user::UserRepository;
pub use user_project::UserProjectRepository;
