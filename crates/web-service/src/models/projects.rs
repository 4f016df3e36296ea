//! 项目接口数据

use crate::models::sprints::SprintInfo;
use crate::models::users::UserInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建项目
///
/// - `workspace_id`、`budget`、起止时间为可选参数
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectCreate {
    #[schema(example = "foo")]
    #[validate(length(min = 1, max = 100))]
    /// 新建项目名称
    pub name: String,

    #[schema(example = "bar")]
    #[validate(length(max = 1000))]
    /// 项目描述
    pub description: Option<String>,

    #[schema(example = 1)]
    /// 所属工作空间
    pub workspace_id: Option<i32>,

    #[schema(example = 25000.0)]
    #[validate(range(min = 0.0))]
    /// 项目预算
    pub budget: Option<f64>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<ProjectCreate> for database::ProjectCreate {
    fn from(project: ProjectCreate) -> Self {
        Self {
            name: project.name,
            description: project.description,
            workspace_id: project.workspace_id,
            budget: project.budget,
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }
}

/// 更新项目，整体覆盖可编辑字段
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectUpdate {
    #[schema(example = "foo")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub workspace_id: Option<i32>,

    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ProjectUpdate {
    pub fn apply(self, project: &mut database::Project) {
        project.name = self.name;
        project.description = self.description;
        project.workspace_id = self.workspace_id;
        project.budget = self.budget;
        project.start_date = self.start_date;
        project.end_date = self.end_date;
    }
}

/// 添加项目成员
#[derive(Deserialize, Debug, ToSchema)]
pub struct MemberAdd {
    #[schema(example = 3)]
    /// 用户ID
    pub user_id: i32,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct WorkspaceInfo {
    pub id: i32,

    #[schema(example = "core")]
    pub name: String,
}

/// 成员记录中引用的项目，只包含基本信息
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectBrief {
    pub id: i32,
    pub name: String,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct MemberInfo {
    pub id: i32,
    pub user_id: i32,
    pub project_id: i32,
    pub user: Option<UserInfo>,
    pub project: Option<ProjectBrief>,
}

impl From<database::UserProject> for MemberInfo {
    fn from(member: database::UserProject) -> Self {
        Self {
            id: member.id.unwrap_or_default(),
            user_id: member.user_id,
            project_id: member.project_id,
            user: member.user.map(Into::into),
            project: member.project.map(|p| ProjectBrief {
                id: p.id.unwrap_or_default(),
                name: p.name,
            }),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectInfo {
    #[schema(example = 15)]
    /// 项目ID
    pub id: i32,

    #[schema(example = "foo")]
    /// 项目名称
    pub name: String,

    pub description: Option<String>,
    pub workspace: Option<WorkspaceInfo>,
    pub budget: Option<f64>,
    pub creation_date: DateTime<Utc>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,

    /// 项目成员
    pub members: Vec<MemberInfo>,
    pub sprints: Vec<SprintInfo>,
}

impl From<database::Project> for ProjectInfo {
    fn from(project: database::Project) -> Self {
        Self {
            id: project.id.unwrap_or_default(),
            name: project.name,
            description: project.description,
            workspace: project.workspace.map(|w| WorkspaceInfo { id: w.id, name: w.name }),
            budget: project.budget,
            creation_date: project.creation_date,
            start_date: project.start_date,
            end_date: project.end_date,
            last_update: project.last_update,
            deleted: project.deleted,
            members: project.user_projects.into_iter().map(Into::into).collect(),
            sprints: project.sprints.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_empty_name_and_negative_budget() {
        let empty = ProjectCreate {
            name: String::new(),
            description: None,
            workspace_id: None,
            budget: None,
            start_date: None,
            end_date: None,
        };
        assert!(empty.validate().is_err());

        let negative = ProjectCreate {
            name: "foo".into(),
            description: None,
            workspace_id: None,
            budget: Some(-1.0),
            start_date: None,
            end_date: None,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn member_info_flattens_project_reference() {
        let project = database::ProjectCreate {
            name: "apollo".into(),
            ..Default::default()
        }
        .into_project(database::models::now());
        let mut member = database::UserProject::new(3, 15);
        member.id = Some(1);
        member.project = Some(Box::new(database::Project { id: Some(15), ..project }));

        let info = MemberInfo::from(member);

        assert_eq!(info.user_id, 3);
        assert!(info.user.is_none());
        let brief = info.project.unwrap();
        assert_eq!((brief.id, brief.name.as_str()), (15, "apollo"));
    }
}
