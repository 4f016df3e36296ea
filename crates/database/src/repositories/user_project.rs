//! 项目成员仓库
//!
//! 负责用户与项目关联记录的数据库操作

use crate::models::user_project::UserProjectRow;
use crate::models::{UserProject, UserProjectFilter, UserProjectRelation};
use crate::repositories::project::projects_by_ids;
use crate::repositories::traits::RepositoryTrait;
use crate::repositories::user::users_by_ids;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 项目成员仓库结构体
#[derive(Debug, Clone)]
pub struct UserProjectRepository {
    pool: PgPool,
}

impl UserProjectRepository {
    /// 创建新的项目成员仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_relations(
        &self,
        members: &mut [UserProject],
        relations: &[UserProjectRelation],
    ) -> DatabaseResult<()> {
        if members.is_empty() {
            return Ok(());
        }

        if relations.contains(&UserProjectRelation::User) {
            let ids: Vec<i32> = members.iter().map(|m| m.user_id).collect();
            let users = users_by_ids(&self.pool, &ids).await?;
            for member in members.iter_mut() {
                member.user = users.get(&member.user_id).cloned();
            }
        }

        if relations.contains(&UserProjectRelation::Project) {
            let ids: Vec<i32> = members.iter().map(|m| m.project_id).collect();
            let projects = projects_by_ids(&self.pool, &ids).await?;
            for member in members.iter_mut() {
                member.project = projects.get(&member.project_id).cloned().map(Box::new);
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl RepositoryTrait<UserProject> for UserProjectRepository {
    /// 保存成员记录，只写入 `user_id` 与 `project_id`
    async fn save(&self, member: UserProject) -> DatabaseResult<UserProject> {
        debug!("📝 保存项目成员: 用户 {} -> 项目 {}", member.user_id, member.project_id);

        match member.id {
            None => {
                let id: i32 = sqlx::query_scalar(
                    "INSERT INTO user_projects (user_id, project_id) VALUES ($1, $2) RETURNING id;",
                )
                .bind(member.user_id)
                .bind(member.project_id)
                .fetch_one(&self.pool)
                .await?;

                debug!("✅ 项目成员创建成功: {}", id);
                Ok(UserProject { id: Some(id), ..member })
            }
            Some(id) => {
                let result = sqlx::query("UPDATE user_projects SET user_id = $2, project_id = $3 WHERE id = $1;")
                    .bind(id)
                    .bind(member.user_id)
                    .bind(member.project_id)
                    .execute(&self.pool)
                    .await?;

                if result.rows_affected() == 0 {
                    return Err(sqlx::Error::RowNotFound.into());
                }

                Ok(member)
            }
        }
    }

    async fn find_all(&self, relations: &[UserProjectRelation]) -> DatabaseResult<Vec<UserProject>> {
        debug!("🔍 查询全部项目成员");

        let mut members: Vec<UserProject> =
            sqlx::query_as::<_, UserProjectRow>("SELECT id, user_id, project_id FROM user_projects ORDER BY id")
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(UserProject::from)
                .collect();

        self.load_relations(&mut members, relations).await?;
        Ok(members)
    }

    async fn find_by_id(&self, id: i32, relations: &[UserProjectRelation]) -> DatabaseResult<Option<UserProject>> {
        debug!("🔍 根据 ID 获取项目成员: {}", id);

        let row = sqlx::query_as::<_, UserProjectRow>(
            "SELECT id, user_id, project_id FROM user_projects WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut members = [UserProject::from(row)];
        self.load_relations(&mut members, relations).await?;

        let [member] = members;
        Ok(Some(member))
    }

    async fn find_by(
        &self,
        filter: &UserProjectFilter,
        relations: &[UserProjectRelation],
    ) -> DatabaseResult<Vec<UserProject>> {
        debug!("🔍 按条件查询项目成员: {:?}", filter);

        let mut members: Vec<UserProject> = sqlx::query_as::<_, UserProjectRow>(
            r#"
            SELECT id, user_id, project_id
            FROM user_projects
            WHERE ($1::int4 IS NULL OR project_id = $1)
              AND ($2::int4 IS NULL OR user_id = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.project_id)
        .bind(filter.user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(UserProject::from)
        .collect();

        self.load_relations(&mut members, relations).await?;
        Ok(members)
    }
}
