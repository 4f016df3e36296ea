//! 服务层模块
//!
//! 包含业务逻辑的服务层实现，遵循六边形架构原则：
//! 服务只依赖 [`database::RepositoryTrait`]，具体的存储实现通过构造函数传入。

pub mod crud;
pub mod error;
pub mod password;
pub mod project;
pub mod sprint;
pub mod traits;
pub mod user;

pub use crud::CrudService;
pub use error::{ServiceError, ServiceResult};
pub use password::{Argon2PasswordHasher, PasswordHasherTrait};
pub use project::ProjectService;
pub use sprint::SprintService;
pub use traits::{ProjectServiceTrait, SprintServiceTrait, UserServiceTrait};
pub use user::UserService;
