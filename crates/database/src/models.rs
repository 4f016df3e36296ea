//! 数据库模型模块
//!
//! 这里定义与数据库表对应的结构体和相关操作

pub mod entity;
pub mod event;
pub mod project;
pub mod sprint;
pub mod user;
pub mod user_project;
pub mod workspace;

// 重新导出具体的模型
pub use entity::{now, now_after, Entity, SoftDelete, Timestamped};
pub use event::Event;
pub use project::{Project, ProjectCreate, ProjectFilter, ProjectRelation};
pub use sprint::{Sprint, SprintCreate, SprintFilter, SprintRelation};
pub use user::{email_local_part, User, UserCreate, UserFilter, UserRelation};
pub use user_project::{UserProject, UserProjectFilter, UserProjectRelation};
pub use workspace::Workspace;
