//! 迭代数据库模型

use crate::models::entity::{Entity, SoftDelete, Timestamped};
use crate::models::Event;
use chrono::{DateTime, Utc};

/// 迭代信息结构体
///
/// `events` 只在查询时指定 [`SprintRelation::Events`] 时填充
#[derive(Debug, Clone, PartialEq)]
pub struct Sprint {
    pub id: Option<i32>,
    pub name: String,
    pub project_id: Option<i32>,
    pub events: Vec<Event>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub creation_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,
}

/// 迭代创建参数
#[derive(Debug, Clone, Default)]
pub struct SprintCreate {
    pub name: String,
    pub project_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl SprintCreate {
    pub fn into_sprint(self, at: DateTime<Utc>) -> Sprint {
        Sprint {
            id: None,
            name: self.name,
            project_id: self.project_id,
            events: Vec::new(),
            start_date: self.start_date,
            end_date: self.end_date,
            creation_date: at,
            last_update: at,
            deleted: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintRelation {
    Events,
}

/// 迭代查询过滤器
#[derive(Debug, Clone, Default)]
pub struct SprintFilter {
    pub project_id: Option<i32>,
    pub deleted: Option<bool>,
}

impl Entity for Sprint {
    type Relation = SprintRelation;
    type Filter = SprintFilter;

    const NAME: &'static str = "Sprint";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

impl SoftDelete for Sprint {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

impl Timestamped for Sprint {
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

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SprintRow {
    pub id: i32,
    pub name: String,
    pub project_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub creation_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,
}

impl From<SprintRow> for Sprint {
    fn from(row: SprintRow) -> Self {
        Sprint {
            id: Some(row.id),
            name: row.name,
            project_id: row.project_id,
            events: Vec::new(),
            start_date: row.start_date,
            end_date: row.end_date,
            creation_date: row.creation_date,
            last_update: row.last_update,
            deleted: row.deleted,
        }
    }
}
