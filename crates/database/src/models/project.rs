//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体

use crate::models::entity::{Entity, SoftDelete, Timestamped};
use crate::models::{Sprint, UserProject, Workspace};
use chrono::{DateTime, Utc};

/// 项目信息结构体
///
/// `workspace`、`user_projects`、`sprints` 只有在查询时指定了对应的
/// [`ProjectRelation`] 才会被填充，保存项目时不会写入这些关联数据。
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: Option<i32>,
    pub workspace: Option<Workspace>,
    pub user_projects: Vec<UserProject>,
    pub budget: Option<f64>,
    pub creation_date: DateTime<Utc>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,
    pub sprints: Vec<Sprint>,
}

impl Project {
    /// 去掉所有关联数据后的副本，用于成员记录中的反向引用
    pub fn without_relations(&self) -> Self {
        Self {
            workspace: None,
            user_projects: Vec::new(),
            sprints: Vec::new(),
            ..self.clone()
        }
    }
}

/// 项目创建参数
#[derive(Debug, Clone, Default)]
pub struct ProjectCreate {
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: Option<i32>,
    pub budget: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ProjectCreate {
    /// 转换为尚未保存的项目，时间戳由调用方写入
    pub fn into_project(self, at: DateTime<Utc>) -> Project {
        Project {
            id: None,
            name: self.name,
            description: self.description,
            workspace_id: self.workspace_id,
            workspace: None,
            user_projects: Vec::new(),
            budget: self.budget,
            creation_date: at,
            start_date: self.start_date,
            end_date: self.end_date,
            last_update: at,
            deleted: false,
            sprints: Vec::new(),
        }
    }
}

/// 项目可预加载的关联关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRelation {
    Workspace,
    /// 成员记录，包含成员记录中的用户与项目
    UserProjects,
    Sprints,
}

/// 项目查询过滤器
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub name: Option<String>,
    pub deleted: Option<bool>,
}

impl Entity for Project {
    type Relation = ProjectRelation;
    type Filter = ProjectFilter;

    const NAME: &'static str = "Project";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

impl SoftDelete for Project {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

impl Timestamped for Project {
    fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn stamp_creation(&mut self, at: DateTime<Utc>) {
        self.creation_date = at;
        self.last_update = at;
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_update = at;
    }
}

/// `projects` 表的一行数据
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProjectRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: Option<i32>,
    pub budget: Option<f64>,
    pub creation_date: DateTime<Utc>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            workspace_id: row.workspace_id,
            workspace: None,
            user_projects: Vec::new(),
            budget: row.budget,
            creation_date: row.creation_date,
            start_date: row.start_date,
            end_date: row.end_date,
            last_update: row.last_update,
            deleted: row.deleted,
            sprints: Vec::new(),
        }
    }
}
