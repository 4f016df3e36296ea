//! 迭代服务

use crate::services::crud::CrudService;
use crate::services::error::ServiceResult;
use crate::services::traits::SprintServiceTrait;
use database::models::now;
use database::{RepositoryTrait, Sprint, SprintCreate, SprintFilter, SprintRelation};
use std::sync::Arc;

/// 迭代服务，查询时预加载事件
pub struct SprintService<SR: RepositoryTrait<Sprint>> {
    sprints: CrudService<Sprint, SR>,
}

impl<SR: RepositoryTrait<Sprint>> SprintService<SR> {
    pub fn new(sprint_repository: Arc<SR>) -> Self {
        Self {
            sprints: CrudService::new(sprint_repository, &[SprintRelation::Events]),
        }
    }
}

#[async_trait::async_trait]
impl<SR: RepositoryTrait<Sprint>> SprintServiceTrait for SprintService<SR> {
    async fn create(&self, sprint: SprintCreate) -> ServiceResult<Sprint> {
        self.sprints.create(sprint.into_sprint(now())).await
    }

    async fn find_all(&self) -> ServiceResult<Vec<Sprint>> {
        self.sprints.find_all().await
    }

    async fn find_one(&self, id: i32) -> ServiceResult<Sprint> {
        self.sprints.find_one(id).await
    }

    async fn find_by_project(&self, project_id: i32) -> ServiceResult<Vec<Sprint>> {
        let filter = SprintFilter {
            project_id: Some(project_id),
            ..Default::default()
        };
        self.sprints.find_by(&filter).await
    }

    async fn save(&self, sprint: Sprint) -> ServiceResult<Sprint> {
        self.sprints.save(sprint).await
    }

    async fn delete(&self, sprint: Sprint) -> ServiceResult<Sprint> {
        self.sprints.delete(sprint).await
    }
}
