//! 项目相关接口
//!

use crate::models::common::{Reply, ReplyList};
use crate::models::err::AppError;
use crate::models::projects::{MemberAdd, MemberInfo, ProjectCreate, ProjectInfo, ProjectUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use database::models::now_after;
use database::UserProject;
use tracing::debug;
use validator::Validate;

/// 查询全部项目
///
/// 返回的项目中预加载了工作空间、成员以及迭代。
///
/// 注意：**强烈建议**在handler上开启 [`axum::debug_handler`] 宏，否则错误提示信息可能不是很明确。
///
/// ## 返回值
///
/// 返回值的类型是 [`Result<Json<ReplyList<ProjectInfo>>, AppError>`]：
///
/// 1. [`Json`] 会对内部类型进行json序列化，保证返回的数据是一个合法的json字符串
/// 2. [`ReplyList`] 是我们封装的一个类型，表明结果是一个通用的`api-json`格式列表对象
/// 3. [`AppError`] 是错误时返回的Error类型，会根据错误类型转换为相应的http错误码
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All projects", body = ReplyList<ProjectInfo>)
    ),
)]
pub async fn find_projects(State(state): State<AppState>) -> Result<Json<ReplyList<ProjectInfo>>, AppError> {
    debug!("🔍 查询全部项目");

    let projects = state.project_service.find_all().await?;

    Ok(Json(ReplyList::from_items(projects)))
}

/// 创建项目
///
/// 根据用户输入参数创建项目信息，创建时间由服务端写入
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectCreate,
    responses(
        (status = 200, description = "Create project result", body = Reply<ProjectInfo>),
        (status = 400, description = "Invalid project"),
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Json(project): Json<ProjectCreate>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("📝 创建项目 {:#?}", project);

    project.validate()?;

    let project = state.project_service.create(project.into()).await?;

    Ok(Json(Reply { data: project.into() }))
}

/// 查询指定项目信息
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Project detail", body = Reply<ProjectInfo>),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("🔍 查询项目 {}", project_id);

    let project = state.project_service.find_one(project_id).await?;

    Ok(Json(Reply { data: project.into() }))
}

/// 更新项目信息
///
/// 根据用户指定的 `id` 和 修改信息 [`ProjectUpdate`] 整体覆盖项目的可编辑字段，
/// 并刷新最后更新时间。
#[utoipa::path(put,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    request_body = ProjectUpdate,
    responses(
        (status = 200, description = "Updated project", body = Reply<ProjectInfo>),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(info): Json<ProjectUpdate>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("✏️ 更新项目 {} {:#?}", project_id, info);

    info.validate()?;

    let mut project = state.project_service.find_one(project_id).await?;
    info.apply(&mut project);
    project.last_update = now_after(project.last_update);

    state.project_service.save(project).await?;

    // 重新查询，保证工作空间等关联数据与保存后的引用一致
    let project = state.project_service.find_one(project_id).await?;

    Ok(Json(Reply { data: project.into() }))
}

/// 删除指定的项目
///
/// 只做逻辑删除，记录仍然保留
#[utoipa::path(delete,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Deleted project", body = Reply<ProjectInfo>),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("🗑️ 删除项目 {}", project_id);

    let project = state.project_service.find_one(project_id).await?;
    let project = state.project_service.delete(project).await?;

    Ok(Json(Reply { data: project.into() }))
}

/// 查询项目成员
#[utoipa::path(get,
    path = "/projects/{id}/members",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Project members", body = ReplyList<MemberInfo>),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn get_project_members(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ReplyList<MemberInfo>>, AppError> {
    let members = state.project_service.get_members(project_id).await?;

    Ok(Json(ReplyList::from_items(members)))
}

/// 添加项目成员
///
/// 项目或用户不存在时返回404
#[utoipa::path(post,
    path = "/projects/{id}/members",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    request_body = MemberAdd,
    responses(
        (status = 200, description = "Created membership", body = Reply<MemberInfo>),
        (status = 404, description = "Project or user not found"),
    )
)]
pub async fn add_project_member(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(member): Json<MemberAdd>,
) -> Result<Json<Reply<MemberInfo>>, AppError> {
    let member = state
        .project_service
        .add_member(UserProject::new(member.user_id, project_id))
        .await?;

    Ok(Json(Reply { data: member.into() }))
}
