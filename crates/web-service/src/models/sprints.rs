//! 迭代接口数据

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建迭代
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct SprintCreate {
    #[schema(example = "Sprint 1")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[schema(example = 15)]
    /// 所属项目ID
    pub project_id: Option<i32>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<SprintCreate> for database::SprintCreate {
    fn from(sprint: SprintCreate) -> Self {
        Self {
            name: sprint.name,
            project_id: sprint.project_id,
            start_date: sprint.start_date,
            end_date: sprint.end_date,
        }
    }
}

/// 更新迭代，整体覆盖可编辑字段
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct SprintUpdate {
    #[schema(example = "Sprint 1")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub project_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl SprintUpdate {
    pub fn apply(self, sprint: &mut database::Sprint) {
        sprint.name = self.name;
        sprint.project_id = self.project_id;
        sprint.start_date = self.start_date;
        sprint.end_date = self.end_date;
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct EventInfo {
    pub id: i32,

    #[schema(example = "Sprint review")]
    pub name: String,

    pub date: Option<DateTime<Utc>>,
}

impl From<database::Event> for EventInfo {
    fn from(event: database::Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date: event.date,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct SprintInfo {
    #[schema(example = 7)]
    /// 迭代ID
    pub id: i32,

    #[schema(example = "Sprint 1")]
    pub name: String,

    pub project_id: Option<i32>,
    pub events: Vec<EventInfo>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub creation_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,
}

impl From<database::Sprint> for SprintInfo {
    fn from(sprint: database::Sprint) -> Self {
        Self {
            id: sprint.id.unwrap_or_default(),
            name: sprint.name,
            project_id: sprint.project_id,
            events: sprint.events.into_iter().map(Into::into).collect(),
            start_date: sprint.start_date,
            end_date: sprint.end_date,
            creation_date: sprint.creation_date,
            last_update: sprint.last_update,
            deleted: sprint.deleted,
        }
    }
}
