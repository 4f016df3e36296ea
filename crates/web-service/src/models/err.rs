use crate::services::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 服务层错误，查询不到记录时转换为404
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    /// 接口层判断的资源不存在（例如用户查询返回空）
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceError(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            AppError::ServiceError(ServiceError::Repository(DatabaseError::ValidationError(_))) => {
                StatusCode::BAD_REQUEST
            }
            AppError::ServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::ValidationFailed(err) => format!("Validate failed: {err}"),
            AppError::ServiceError(err) if status == StatusCode::NOT_FOUND => format!("Record not found: {err}"),
            AppError::ServiceError(err) if status == StatusCode::BAD_REQUEST => format!("Validate failed: {err}"),
            AppError::ServiceError(err) => format!("Service error: {err}"),
            AppError::NotFound(msg) => format!("Resource not found: {msg}"),
            AppError::InternalError(err) => format!("Something went wrong: {err}"),
        };

        if status.is_server_error() {
            error!("💥 请求处理失败: {}", self);
        }

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let invalid = Named { name: String::new() }.validate().unwrap_err();
        assert_eq!(AppError::from(invalid).status_code(), StatusCode::BAD_REQUEST);

        let missing = ServiceError::not_found("Project", 1);
        assert_eq!(AppError::from(missing).status_code(), StatusCode::NOT_FOUND);

        let row_missing = ServiceError::from(DatabaseError::not_found("Sprint", 2));
        assert_eq!(AppError::from(row_missing).status_code(), StatusCode::NOT_FOUND);

        let conflict = ServiceError::from(DatabaseError::validation("邮箱已被使用: a@b.c"));
        assert_eq!(AppError::from(conflict).status_code(), StatusCode::BAD_REQUEST);

        let broken = ServiceError::from(DatabaseError::connection("pool closed"));
        assert_eq!(AppError::from(broken).status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(AppError::NotFound("User 3".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::from(eyre!("boom")).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_carries_status() {
        let response = AppError::NotFound("User 3".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
