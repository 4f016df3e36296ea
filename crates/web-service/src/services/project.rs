//! 项目服务
//!
//! 提供项目相关的业务逻辑操作

use crate::services::crud::CrudService;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::traits::ProjectServiceTrait;
use database::models::now;
use database::{Project, ProjectCreate, ProjectRelation, RepositoryTrait, User, UserProject};
use std::sync::Arc;
use tracing::debug;

/// 查询项目时预加载的关联关系
const PROJECT_RELATIONS: [ProjectRelation; 3] =
    [ProjectRelation::Workspace, ProjectRelation::UserProjects, ProjectRelation::Sprints];

/// 项目服务
///
/// 除了项目仓库，还需要用户仓库和成员仓库来实现成员管理
pub struct ProjectService<PR, UR, MR>
where
    PR: RepositoryTrait<Project>,
    UR: RepositoryTrait<User>,
    MR: RepositoryTrait<UserProject>,
{
    projects: CrudService<Project, PR>,
    user_repository: Arc<UR>,
    user_project_repository: Arc<MR>,
}

impl<PR, UR, MR> ProjectService<PR, UR, MR>
where
    PR: RepositoryTrait<Project>,
    UR: RepositoryTrait<User>,
    MR: RepositoryTrait<UserProject>,
{
    pub fn new(project_repository: Arc<PR>, user_repository: Arc<UR>, user_project_repository: Arc<MR>) -> Self {
        Self {
            projects: CrudService::new(project_repository, &PROJECT_RELATIONS),
            user_repository,
            user_project_repository,
        }
    }
}

#[async_trait::async_trait]
impl<PR, UR, MR> ProjectServiceTrait for ProjectService<PR, UR, MR>
where
    PR: RepositoryTrait<Project>,
    UR: RepositoryTrait<User>,
    MR: RepositoryTrait<UserProject>,
{
    async fn create(&self, project: ProjectCreate) -> ServiceResult<Project> {
        let mut project = self.projects.create(project.into_project(now())).await?;

        // 回填工作空间引用
        if let (Some(id), Some(_)) = (project.id, project.workspace_id) {
            if let Some(stored) = self
                .projects
                .repository()
                .find_by_id(id, &[ProjectRelation::Workspace])
                .await?
            {
                project.workspace = stored.workspace;
            }
        }

        Ok(project)
    }

    async fn find_all(&self) -> ServiceResult<Vec<Project>> {
        self.projects.find_all().await
    }

    async fn find_one(&self, id: i32) -> ServiceResult<Project> {
        self.projects.find_one(id).await
    }

    /// 添加项目成员
    ///
    /// 项目查询、用户查询、写入成员记录是三次独立的数据库往返，不在同一个事务中
    async fn add_member(&self, mut member: UserProject) -> ServiceResult<UserProject> {
        debug!("👥 添加项目成员: 用户 {} -> 项目 {}", member.user_id, member.project_id);

        let project = self
            .projects
            .repository()
            .find_by_id(member.project_id, &[])
            .await?
            .ok_or_else(|| ServiceError::not_found("Project", member.project_id))?;

        let user = self
            .user_repository
            .find_by_id(member.user_id, &[])
            .await?
            .ok_or_else(|| ServiceError::not_found("User", member.user_id))?;

        member.project = Some(Box::new(project.without_relations()));
        member.user = Some(user);

        Ok(self.user_project_repository.save(member).await?)
    }

    async fn get_members(&self, id: i32) -> ServiceResult<Vec<UserProject>> {
        let project = self.projects.find_one(id).await?;
        Ok(project.user_projects)
    }

    async fn save(&self, project: Project) -> ServiceResult<Project> {
        self.projects.save(project).await
    }

    async fn delete(&self, project: Project) -> ServiceResult<Project> {
        self.projects.delete(project).await
    }
}
