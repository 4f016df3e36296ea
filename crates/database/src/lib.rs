//! 数据库操作模块
//!
//! 这个模块提供了数据库连接、实体模型以及各实体的Repository实现

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{initialize_database, DatabasePool};
pub use error::DatabaseError;
pub use models::{
    Entity, Event, Project, ProjectCreate, ProjectFilter, ProjectRelation, SoftDelete, Sprint, SprintCreate,
    SprintFilter, SprintRelation, Timestamped, User, UserCreate, UserFilter, UserProject, UserProjectFilter,
    UserProjectRelation, UserRelation, Workspace,
};
pub use repositories::{
    traits::RepositoryTrait, ProjectRepository, SprintRepository, UserProjectRepository, UserRepository,
};

/// 数据库操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
