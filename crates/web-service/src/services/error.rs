use database::DatabaseError;
use thiserror::Error;

/// 服务层错误
///
/// 服务层只会主动抛出 [`ServiceError::NotFound`]，其他错误都来自下层并原样向上传播
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 根据ID查询不到记录
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// 仓库层错误
    #[error(transparent)]
    Repository(#[from] DatabaseError),

    /// 密码哈希失败
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// 是否应当转换为 404
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Repository(err) => err.is_not_found(),
            Self::PasswordHash(_) => false,
        }
    }
}

/// 服务层结果类型
pub type ServiceResult<T> = Result<T, ServiceError>;
