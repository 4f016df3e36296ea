//! 用户相关接口
//!
//! 用户服务查询不到用户时返回空结果，这里统一转换为404

use crate::models::common::{Reply, ReplyList};
use crate::models::err::AppError;
use crate::models::users::{UserCreate, UserInfo, UserUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use database::User;
use tracing::debug;
use validator::Validate;

async fn load_user(state: &AppState, user_id: i32) -> Result<User, AppError> {
    state
        .user_service
        .find_one(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id}")))
}

#[utoipa::path(get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = ReplyList<UserInfo>)
    ),
)]
pub async fn find_users(State(state): State<AppState>) -> Result<Json<ReplyList<UserInfo>>, AppError> {
    let users = state.user_service.find_all().await?;

    Ok(Json(ReplyList::from_items(users)))
}

/// 注册用户
///
/// 用户名称取邮箱 `@` 之前的部分，密码只保存哈希
#[utoipa::path(post,
    path = "/users",
    tag = "users",
    request_body = UserCreate,
    responses(
        (status = 200, description = "Created user", body = Reply<UserInfo>),
        (status = 400, description = "Invalid email or password"),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<UserCreate>,
) -> Result<Json<Reply<UserInfo>>, AppError> {
    debug!("📝 注册用户 {}", user.email);

    user.validate()?;

    let user = state.user_service.create(user.into()).await?;

    Ok(Json(Reply { data: user.into() }))
}

#[utoipa::path(get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "用户ID")),
    responses(
        (status = 200, description = "User detail", body = Reply<UserInfo>),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Reply<UserInfo>>, AppError> {
    let user = load_user(&state, user_id).await?;

    Ok(Json(Reply { data: user.into() }))
}

#[utoipa::path(get,
    path = "/users/by-email/{email}",
    tag = "users",
    params(("email" = String, Path, description = "用户邮箱")),
    responses(
        (status = 200, description = "User detail", body = Reply<UserInfo>),
        (status = 404, description = "User not found"),
    )
)]
pub async fn find_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Reply<UserInfo>>, AppError> {
    let user = state
        .user_service
        .find_one_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {email}")))?;

    Ok(Json(Reply { data: user.into() }))
}

/// 更新用户信息
///
/// 最后更新时间由用户服务在保存时刷新
#[utoipa::path(put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "用户ID")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = Reply<UserInfo>),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(info): Json<UserUpdate>,
) -> Result<Json<Reply<UserInfo>>, AppError> {
    debug!("✏️ 更新用户 {} {:#?}", user_id, info);

    info.validate()?;

    let mut user = load_user(&state, user_id).await?;
    info.apply(&mut user);

    let user = state.user_service.save(user).await?;

    Ok(Json(Reply { data: user.into() }))
}

#[utoipa::path(delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "用户ID")),
    responses(
        (status = 200, description = "Deleted user", body = Reply<UserInfo>),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Reply<UserInfo>>, AppError> {
    let user = load_user(&state, user_id).await?;
    let user = state.user_service.delete(user).await?;

    Ok(Json(Reply { data: user.into() }))
}
