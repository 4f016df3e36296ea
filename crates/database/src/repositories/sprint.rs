//! 迭代仓库
//!
//! 负责迭代相关的数据库操作

use crate::models::sprint::SprintRow;
use crate::models::{Event, Sprint, SprintFilter, SprintRelation};
use crate::repositories::traits::RepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;

const SPRINT_COLUMNS: &str = "id, name, project_id, start_date, end_date, creation_date, last_update, deleted";

/// 迭代仓库结构体
#[derive(Debug, Clone)]
pub struct SprintRepository {
    pool: PgPool,
}

impl SprintRepository {
    /// 创建新的迭代仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_relations(&self, sprints: &mut [Sprint], relations: &[SprintRelation]) -> DatabaseResult<()> {
        if sprints.is_empty() || !relations.contains(&SprintRelation::Events) {
            return Ok(());
        }

        let ids: Vec<i32> = sprints.iter().filter_map(|s| s.id).collect();
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, sprint_id, name, date FROM events WHERE sprint_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i32, Vec<Event>> = HashMap::new();
        for event in events {
            grouped.entry(event.sprint_id).or_default().push(event);
        }

        for sprint in sprints.iter_mut() {
            sprint.events = sprint.id.and_then(|id| grouped.remove(&id)).unwrap_or_default();
        }

        Ok(())
    }

    async fn fetch(&self, sql: &str, relations: &[SprintRelation]) -> DatabaseResult<Vec<Sprint>> {
        let mut sprints: Vec<Sprint> = sqlx::query_as::<_, SprintRow>(sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Sprint::from)
            .collect();

        self.load_relations(&mut sprints, relations).await?;
        Ok(sprints)
    }
}

#[async_trait::async_trait]
impl RepositoryTrait<Sprint> for SprintRepository {
    /// 保存迭代
    ///
    /// 事件由其他模块维护，这里不会写入 `events`
    async fn save(&self, sprint: Sprint) -> DatabaseResult<Sprint> {
        debug!("📝 保存迭代: {} ({:?})", sprint.name, sprint.id);

        match sprint.id {
            None => {
                let id: i32 = sqlx::query_scalar(
                    r#"
                    INSERT INTO sprints (name, project_id, start_date, end_date, creation_date, last_update, deleted)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING id;
                    "#,
                )
                .bind(&sprint.name)
                .bind(sprint.project_id)
                .bind(sprint.start_date)
                .bind(sprint.end_date)
                .bind(sprint.creation_date)
                .bind(sprint.last_update)
                .bind(sprint.deleted)
                .fetch_one(&self.pool)
                .await?;

                debug!("✅ 迭代创建成功: {}", id);
                Ok(Sprint { id: Some(id), ..sprint })
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE sprints
                    SET name = $2,
                        project_id = $3,
                        start_date = $4,
                        end_date = $5,
                        creation_date = $6,
                        last_update = $7,
                        deleted = $8
                    WHERE id = $1;
                    "#,
                )
                .bind(id)
                .bind(&sprint.name)
                .bind(sprint.project_id)
                .bind(sprint.start_date)
                .bind(sprint.end_date)
                .bind(sprint.creation_date)
                .bind(sprint.last_update)
                .bind(sprint.deleted)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(sqlx::Error::RowNotFound.into());
                }

                debug!("✅ 迭代更新成功: {}", id);
                Ok(sprint)
            }
        }
    }

    async fn find_all(&self, relations: &[SprintRelation]) -> DatabaseResult<Vec<Sprint>> {
        debug!("🔍 查询全部迭代, 关联: {:?}", relations);

        let sql = format!("SELECT {SPRINT_COLUMNS} FROM sprints ORDER BY id");
        self.fetch(&sql, relations).await
    }

    async fn find_by_id(&self, id: i32, relations: &[SprintRelation]) -> DatabaseResult<Option<Sprint>> {
        debug!("🔍 根据 ID 获取迭代: {}", id);

        let sql = format!("SELECT {SPRINT_COLUMNS} FROM sprints WHERE id = $1 LIMIT 1");
        let row = sqlx::query_as::<_, SprintRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut sprints = [Sprint::from(row)];
        self.load_relations(&mut sprints, relations).await?;

        let [sprint] = sprints;
        Ok(Some(sprint))
    }

    async fn find_by(&self, filter: &SprintFilter, relations: &[SprintRelation]) -> DatabaseResult<Vec<Sprint>> {
        debug!("🔍 按条件查询迭代: {:?}", filter);

        let sql = format!(
            "SELECT {SPRINT_COLUMNS} FROM sprints
             WHERE ($1::int4 IS NULL OR project_id = $1)
               AND ($2::bool IS NULL OR deleted = $2)
             ORDER BY id"
        );
        let mut sprints: Vec<Sprint> = sqlx::query_as::<_, SprintRow>(&sql)
            .bind(filter.project_id)
            .bind(filter.deleted)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Sprint::from)
            .collect();

        self.load_relations(&mut sprints, relations).await?;
        Ok(sprints)
    }
}
