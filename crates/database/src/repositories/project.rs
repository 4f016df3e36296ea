//! 项目仓库
//!
//! 负责项目相关的数据库操作

use crate::models::project::ProjectRow;
use crate::models::sprint::SprintRow;
use crate::models::user_project::UserProjectRow;
use crate::models::{Project, ProjectFilter, ProjectRelation, Sprint, UserProject, Workspace};
use crate::repositories::traits::RepositoryTrait;
use crate::repositories::user::users_by_ids;
use crate::DatabaseResult;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;

const PROJECT_COLUMNS: &str =
    "id, name, description, workspace_id, budget, creation_date, start_date, end_date, last_update, deleted";

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 为一批项目填充关联数据
    ///
    /// 每种关联关系只执行一次 `ANY($1)` 查询，再在内存中按ID归组
    async fn load_relations(&self, projects: &mut [Project], relations: &[ProjectRelation]) -> DatabaseResult<()> {
        if projects.is_empty() || relations.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = projects.iter().filter_map(|p| p.id).collect();

        if relations.contains(&ProjectRelation::Workspace) {
            let workspace_ids: Vec<i32> = projects.iter().filter_map(|p| p.workspace_id).collect();
            let workspaces: HashMap<i32, Workspace> = if workspace_ids.is_empty() {
                HashMap::new()
            } else {
                sqlx::query_as::<_, Workspace>("SELECT id, name FROM workspaces WHERE id = ANY($1)")
                    .bind(&workspace_ids)
                    .fetch_all(&self.pool)
                    .await?
                    .into_iter()
                    .map(|w| (w.id, w))
                    .collect()
            };

            for project in projects.iter_mut() {
                project.workspace = project.workspace_id.and_then(|id| workspaces.get(&id).cloned());
            }
        }

        if relations.contains(&ProjectRelation::UserProjects) {
            let rows = sqlx::query_as::<_, UserProjectRow>(
                "SELECT id, user_id, project_id FROM user_projects WHERE project_id = ANY($1) ORDER BY id",
            )
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

            let user_ids: Vec<i32> = rows.iter().map(|r| r.user_id).collect();
            let users = users_by_ids(&self.pool, &user_ids).await?;

            // 反向引用使用不带关联数据的项目副本
            let shells: HashMap<i32, Project> = projects
                .iter()
                .filter_map(|p| p.id.map(|id| (id, p.without_relations())))
                .collect();

            let mut grouped: HashMap<i32, Vec<UserProject>> = HashMap::new();
            for row in rows {
                let mut member = UserProject::from(row);
                member.user = users.get(&member.user_id).cloned();
                member.project = shells.get(&member.project_id).cloned().map(Box::new);
                grouped.entry(member.project_id).or_default().push(member);
            }

            for project in projects.iter_mut() {
                project.user_projects = project.id.and_then(|id| grouped.remove(&id)).unwrap_or_default();
            }
        }

        if relations.contains(&ProjectRelation::Sprints) {
            let rows = sqlx::query_as::<_, SprintRow>(
                r#"
                SELECT id, name, project_id, start_date, end_date, creation_date, last_update, deleted
                FROM sprints
                WHERE project_id = ANY($1)
                ORDER BY id
                "#,
            )
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

            let mut grouped: HashMap<i32, Vec<Sprint>> = HashMap::new();
            for row in rows {
                let sprint = Sprint::from(row);
                if let Some(project_id) = sprint.project_id {
                    grouped.entry(project_id).or_default().push(sprint);
                }
            }

            for project in projects.iter_mut() {
                project.sprints = project.id.and_then(|id| grouped.remove(&id)).unwrap_or_default();
            }
        }

        Ok(())
    }
}

/// 批量查询项目（不含关联数据），返回 `id -> Project` 的映射
pub(crate) async fn projects_by_ids(pool: &PgPool, ids: &[i32]) -> DatabaseResult<HashMap<i32, Project>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ANY($1)");
    let rows = sqlx::query_as::<_, ProjectRow>(&sql).bind(ids).fetch_all(pool).await?;

    Ok(rows.into_iter().map(|r| (r.id, Project::from(r))).collect())
}

#[async_trait::async_trait]
impl RepositoryTrait<Project> for ProjectRepository {
    /// 保存项目
    ///
    /// 只写入项目自身的字段以及工作空间引用，成员与迭代由各自的仓库维护。
    ///
    /// # 返回值
    /// 返回保存后的项目，关联数据保持调用方传入的值
    async fn save(&self, project: Project) -> DatabaseResult<Project> {
        debug!("📝 保存项目: {} ({:?})", project.name, project.id);

        match project.id {
            None => {
                let id: i32 = sqlx::query_scalar(
                    r#"
                    INSERT INTO projects (name, description, workspace_id, budget, creation_date,
                                          start_date, end_date, last_update, deleted)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    RETURNING id;
                    "#,
                )
                .bind(&project.name)
                .bind(&project.description)
                .bind(project.workspace_id)
                .bind(project.budget)
                .bind(project.creation_date)
                .bind(project.start_date)
                .bind(project.end_date)
                .bind(project.last_update)
                .bind(project.deleted)
                .fetch_one(&self.pool)
                .await?;

                debug!("✅ 项目创建成功: {}", id);
                Ok(Project { id: Some(id), ..project })
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE projects
                    SET name = $2,
                        description = $3,
                        workspace_id = $4,
                        budget = $5,
                        creation_date = $6,
                        start_date = $7,
                        end_date = $8,
                        last_update = $9,
                        deleted = $10
                    WHERE id = $1;
                    "#,
                )
                .bind(id)
                .bind(&project.name)
                .bind(&project.description)
                .bind(project.workspace_id)
                .bind(project.budget)
                .bind(project.creation_date)
                .bind(project.start_date)
                .bind(project.end_date)
                .bind(project.last_update)
                .bind(project.deleted)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(sqlx::Error::RowNotFound.into());
                }

                debug!("✅ 项目更新成功: {}", id);
                Ok(project)
            }
        }
    }

    async fn find_all(&self, relations: &[ProjectRelation]) -> DatabaseResult<Vec<Project>> {
        debug!("🔍 查询全部项目, 关联: {:?}", relations);

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id");
        let mut projects: Vec<Project> = sqlx::query_as::<_, ProjectRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Project::from)
            .collect();

        self.load_relations(&mut projects, relations).await?;

        debug!("✅ 查询完成 - 找到 {} 个项目", projects.len());
        Ok(projects)
    }

    async fn find_by_id(&self, id: i32, relations: &[ProjectRelation]) -> DatabaseResult<Option<Project>> {
        debug!("🔍 根据 ID 获取项目: {}, 关联: {:?}", id, relations);

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 LIMIT 1");
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut projects = [Project::from(row)];
        self.load_relations(&mut projects, relations).await?;

        let [project] = projects;
        Ok(Some(project))
    }

    async fn find_by(&self, filter: &ProjectFilter, relations: &[ProjectRelation]) -> DatabaseResult<Vec<Project>> {
        debug!("🔍 按条件查询项目: {:?}", filter);

        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE ($1::text IS NULL OR name = $1)
               AND ($2::bool IS NULL OR deleted = $2)
             ORDER BY id"
        );
        let mut projects: Vec<Project> = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(filter.name.as_deref())
            .bind(filter.deleted)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Project::from)
            .collect();

        self.load_relations(&mut projects, relations).await?;

        Ok(projects)
    }
}
