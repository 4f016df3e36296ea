//! 迭代相关接口

use crate::models::common::{Reply, ReplyList};
use crate::models::err::AppError;
use crate::models::sprints::{SprintCreate, SprintInfo, SprintUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use database::models::now_after;
use tracing::debug;
use validator::Validate;

/// 查询全部迭代，迭代中预加载事件
#[utoipa::path(get,
    path = "/sprints",
    tag = "sprints",
    responses(
        (status = 200, description = "All sprints", body = ReplyList<SprintInfo>)
    ),
)]
pub async fn find_sprints(State(state): State<AppState>) -> Result<Json<ReplyList<SprintInfo>>, AppError> {
    let sprints = state.sprint_service.find_all().await?;

    Ok(Json(ReplyList::from_items(sprints)))
}

/// 查询项目下的迭代
#[utoipa::path(get,
    path = "/projects/{id}/sprints",
    tag = "sprints",
    params(("id" = i32, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Sprints of the project", body = ReplyList<SprintInfo>),
        (status = 404, description = "Project not found"),
    ),
)]
pub async fn find_project_sprints(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ReplyList<SprintInfo>>, AppError> {
    debug!("🔍 查询项目 {} 的迭代", project_id);

    // 先确认项目存在，否则空列表和不存在的项目无法区分
    state.project_service.find_one(project_id).await?;
    let sprints = state.sprint_service.find_by_project(project_id).await?;

    Ok(Json(ReplyList::from_items(sprints)))
}

#[utoipa::path(post,
    path = "/sprints",
    tag = "sprints",
    request_body = SprintCreate,
    responses(
        (status = 200, description = "Create sprint result", body = Reply<SprintInfo>),
        (status = 400, description = "Invalid sprint"),
    )
)]
pub async fn create_sprint(
    State(state): State<AppState>,
    Json(sprint): Json<SprintCreate>,
) -> Result<Json<Reply<SprintInfo>>, AppError> {
    debug!("📝 创建迭代 {:#?}", sprint);

    sprint.validate()?;

    let sprint = state.sprint_service.create(sprint.into()).await?;

    Ok(Json(Reply { data: sprint.into() }))
}

#[utoipa::path(get,
    path = "/sprints/{id}",
    tag = "sprints",
    params(("id" = i32, Path, description = "迭代ID")),
    responses(
        (status = 200, description = "Sprint detail", body = Reply<SprintInfo>),
        (status = 404, description = "Sprint not found"),
    )
)]
pub async fn get_sprint(
    State(state): State<AppState>,
    Path(sprint_id): Path<i32>,
) -> Result<Json<Reply<SprintInfo>>, AppError> {
    let sprint = state.sprint_service.find_one(sprint_id).await?;

    Ok(Json(Reply { data: sprint.into() }))
}

/// 更新迭代信息，整体覆盖可编辑字段并刷新最后更新时间
#[utoipa::path(put,
    path = "/sprints/{id}",
    tag = "sprints",
    params(("id" = i32, Path, description = "迭代ID")),
    request_body = SprintUpdate,
    responses(
        (status = 200, description = "Updated sprint", body = Reply<SprintInfo>),
        (status = 404, description = "Sprint not found"),
    )
)]
pub async fn update_sprint(
    State(state): State<AppState>,
    Path(sprint_id): Path<i32>,
    Json(info): Json<SprintUpdate>,
) -> Result<Json<Reply<SprintInfo>>, AppError> {
    debug!("✏️ 更新迭代 {} {:#?}", sprint_id, info);

    info.validate()?;

    let mut sprint = state.sprint_service.find_one(sprint_id).await?;
    info.apply(&mut sprint);
    sprint.last_update = now_after(sprint.last_update);

    let sprint = state.sprint_service.save(sprint).await?;

    Ok(Json(Reply { data: sprint.into() }))
}

/// 逻辑删除迭代
#[utoipa::path(delete,
    path = "/sprints/{id}",
    tag = "sprints",
    params(("id" = i32, Path, description = "迭代ID")),
    responses(
        (status = 200, description = "Deleted sprint", body = Reply<SprintInfo>),
        (status = 404, description = "Sprint not found"),
    )
)]
pub async fn delete_sprint(
    State(state): State<AppState>,
    Path(sprint_id): Path<i32>,
) -> Result<Json<Reply<SprintInfo>>, AppError> {
    let sprint = state.sprint_service.find_one(sprint_id).await?;
    let sprint = state.sprint_service.delete(sprint).await?;

    Ok(Json(Reply { data: sprint.into() }))
}
