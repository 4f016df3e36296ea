//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有实体共用一个泛型 trait [`RepositoryTrait<T>`]，每个实体的仓库只需要针对自己的实体实现它：
//!
//! ```rust,ignore
//! impl RepositoryTrait<Project> for ProjectRepository { /* ... */ }
//! impl RepositoryTrait<User> for UserRepository { /* ... */ }
//! ```
//!
//! ### Trait 约束说明 📚
//!
//! - `Send + Sync`：服务层会把仓库放到 `Arc` 中，在不同线程的请求处理器之间共享
//! - `'static`：仓库作为应用服务长期存活，不依赖短期引用
//!
//! 服务层通过构造函数接收仓库实例，测试时可以替换为内存实现：
//!
//! ```rust,ignore
//! let projects = Arc::new(ProjectRepository::new(pool.clone()));
//! let users = Arc::new(UserRepository::new(pool.clone()));
//! let members = Arc::new(UserProjectRepository::new(pool.clone()));
//! let service = ProjectService::new(projects, users, members);
//! ```

pub mod repository;

// 重新导出
pub use repository::RepositoryTrait;
