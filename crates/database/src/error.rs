use thiserror::Error;

/// 数据库操作错误类型
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLX 错误
    #[error("数据库操作错误: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// 连接错误
    #[error("数据库连接错误: {0}")]
    ConnectionError(String),

    /// 记录不存在
    #[error("记录不存在: {0}")]
    NotFound(String),

    /// 数据校验错误
    #[error("数据校验错误: {0}")]
    ValidationError(String),
}

impl DatabaseError {
    /// 创建连接错误
    pub fn connection<T: ToString>(msg: T) -> Self {
        Self::ConnectionError(msg.to_string())
    }

    /// 创建记录不存在错误
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} {id}"))
    }

    /// 创建数据校验错误
    pub fn validation<T: ToString>(msg: T) -> Self {
        Self::ValidationError(msg.to_string())
    }

    /// 是否为"记录不存在"类错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::SqlxError(sqlx::Error::RowNotFound))
    }
}
