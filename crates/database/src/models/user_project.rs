//! 项目成员模型（用户与项目的关联记录）

use crate::models::entity::Entity;
use crate::models::{Project, User};

/// 项目成员记录
///
/// `user`、`project` 为解析后的完整引用。`project` 中不会再包含成员与迭代数据，
/// 避免循环嵌套。
#[derive(Debug, Clone, PartialEq)]
pub struct UserProject {
    pub id: Option<i32>,
    pub user_id: i32,
    pub project_id: i32,
    pub user: Option<User>,
    pub project: Option<Box<Project>>,
}

impl UserProject {
    /// 只包含ID引用的成员记录
    pub fn new(user_id: i32, project_id: i32) -> Self {
        Self {
            id: None,
            user_id,
            project_id,
            user: None,
            project: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserProjectRelation {
    User,
    Project,
}

/// 成员记录查询过滤器
#[derive(Debug, Clone, Default)]
pub struct UserProjectFilter {
    pub project_id: Option<i32>,
    pub user_id: Option<i32>,
}

impl Entity for UserProject {
    type Relation = UserProjectRelation;
    type Filter = UserProjectFilter;

    const NAME: &'static str = "UserProject";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserProjectRow {
    pub id: i32,
    pub user_id: i32,
    pub project_id: i32,
}

impl From<UserProjectRow> for UserProject {
    fn from(row: UserProjectRow) -> Self {
        UserProject {
            id: Some(row.id),
            user_id: row.user_id,
            project_id: row.project_id,
            user: None,
            project: None,
        }
    }
}
