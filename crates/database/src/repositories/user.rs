//! 用户仓库
//!
//! 负责用户相关的数据库操作

use crate::models::{User, UserFilter, UserRelation};
use crate::repositories::traits::RepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;

const USER_COLUMNS: &str = "id, name, email, password, creation_date, last_update, deleted";

/// 用户仓库结构体
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// 创建新的用户仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 批量查询用户，返回 `id -> User` 的映射
///
/// 供其他仓库预加载关联关系时使用
pub(crate) async fn users_by_ids(pool: &PgPool, ids: &[i32]) -> DatabaseResult<HashMap<i32, User>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
    let users = sqlx::query_as::<_, User>(&sql).bind(ids).fetch_all(pool).await?;

    Ok(users.into_iter().filter_map(|u| u.id.map(|id| (id, u))).collect())
}

/// 邮箱唯一约束冲突转换为数据校验错误，其他错误原样返回
fn email_conflict(err: sqlx::Error, email: &str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DatabaseError::validation(format!("邮箱已被使用: {email}"))
        }
        _ => err.into(),
    }
}

#[async_trait::async_trait]
impl RepositoryTrait<User> for UserRepository {
    /// 保存用户
    ///
    /// 没有ID时插入新用户，有ID时覆盖更新所有字段
    async fn save(&self, user: User) -> DatabaseResult<User> {
        debug!("📝 保存用户: {} ({:?})", user.email, user.id);

        match user.id {
            None => {
                let id: i32 = sqlx::query_scalar(
                    r#"
                    INSERT INTO users (name, email, password, creation_date, last_update, deleted)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id;
                    "#,
                )
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password)
                .bind(user.creation_date)
                .bind(user.last_update)
                .bind(user.deleted)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| email_conflict(e, &user.email))?;

                debug!("✅ 用户创建成功: {}", id);
                Ok(User { id: Some(id), ..user })
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE users
                    SET name = $2,
                        email = $3,
                        password = $4,
                        creation_date = $5,
                        last_update = $6,
                        deleted = $7
                    WHERE id = $1;
                    "#,
                )
                .bind(id)
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password)
                .bind(user.creation_date)
                .bind(user.last_update)
                .bind(user.deleted)
                .execute(&self.pool)
                .await
                .map_err(|e| email_conflict(e, &user.email))?;

                if result.rows_affected() == 0 {
                    return Err(sqlx::Error::RowNotFound.into());
                }

                debug!("✅ 用户更新成功: {}", id);
                Ok(user)
            }
        }
    }

    async fn find_all(&self, _relations: &[UserRelation]) -> DatabaseResult<Vec<User>> {
        debug!("🔍 查询全部用户");

        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i32, _relations: &[UserRelation]) -> DatabaseResult<Option<User>> {
        debug!("🔍 根据 ID 获取用户: {}", id);

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// 根据过滤条件查询用户
    ///
    /// 使用 `$n IS NULL OR ...` 的写法处理可选条件，避免拼接SQL
    async fn find_by(&self, filter: &UserFilter, _relations: &[UserRelation]) -> DatabaseResult<Vec<User>> {
        debug!("🔍 按条件查询用户: {:?}", filter);

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NULL OR email = $1)
               AND ($2::bool IS NULL OR deleted = $2)
             ORDER BY id"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(filter.email.as_deref())
            .bind(filter.deleted)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}
