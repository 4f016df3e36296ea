//! 测试用内存存储
//!
//! [`MemoryStore`] 同时实现了四个实体的 [`RepositoryTrait`]，按 PostgreSQL 仓库的语义
//! 保存"扁平"的行数据，在查询时再按需组装关联关系。

use crate::services::{
    Argon2PasswordHasher, ProjectService, ProjectServiceTrait, SprintService, SprintServiceTrait, UserService,
    UserServiceTrait,
};
use crate::AppState;
use database::{
    DatabaseError, DatabaseResult, Event, Project, ProjectFilter, ProjectRelation, RepositoryTrait, Sprint,
    SprintFilter, SprintRelation, User, UserFilter, UserProject, UserProjectFilter, UserProjectRelation,
    UserRelation, Workspace,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    next_id: i32,
    workspaces: BTreeMap<i32, Workspace>,
    projects: BTreeMap<i32, Project>,
    sprints: BTreeMap<i32, Sprint>,
    events: Vec<Event>,
    users: BTreeMap<i32, User>,
    user_projects: BTreeMap<i32, UserProject>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn resolve_project(&self, mut project: Project, relations: &[ProjectRelation]) -> Project {
        let Some(id) = project.id else {
            return project;
        };

        if relations.contains(&ProjectRelation::Workspace) {
            project.workspace = project.workspace_id.and_then(|w| self.workspaces.get(&w).cloned());
        }
        if relations.contains(&ProjectRelation::UserProjects) {
            project.user_projects = self
                .user_projects
                .values()
                .filter(|m| m.project_id == id)
                .cloned()
                .map(|m| self.resolve_member(m, &[UserProjectRelation::User, UserProjectRelation::Project]))
                .collect();
        }
        if relations.contains(&ProjectRelation::Sprints) {
            project.sprints = self.sprints.values().filter(|s| s.project_id == Some(id)).cloned().collect();
        }
        project
    }

    fn resolve_sprint(&self, mut sprint: Sprint, relations: &[SprintRelation]) -> Sprint {
        if relations.contains(&SprintRelation::Events) {
            sprint.events = self.events.iter().filter(|e| Some(e.sprint_id) == sprint.id).cloned().collect();
        }
        sprint
    }

    fn resolve_member(&self, mut member: UserProject, relations: &[UserProjectRelation]) -> UserProject {
        if relations.contains(&UserProjectRelation::User) {
            member.user = self.users.get(&member.user_id).cloned();
        }
        if relations.contains(&UserProjectRelation::Project) {
            member.project = self.projects.get(&member.project_id).cloned().map(Box::new);
        }
        member
    }
}

/// 内存存储
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn insert_workspace(&self, name: &str) -> i32 {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.workspaces.insert(id, Workspace { id, name: name.to_string() });
        id
    }

    pub fn insert_event(&self, sprint_id: i32, name: &str) -> i32 {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.events.push(Event { id, sprint_id, name: name.to_string(), date: None });
        id
    }

    /// 直接读取存储中的项目行，不经过服务层
    pub fn project_row(&self, id: i32) -> Option<Project> {
        self.tables().projects.get(&id).cloned()
    }

    pub fn sprint_row(&self, id: i32) -> Option<Sprint> {
        self.tables().sprints.get(&id).cloned()
    }

    pub fn user_row(&self, id: i32) -> Option<User> {
        self.tables().users.get(&id).cloned()
    }

    pub fn membership_count(&self) -> usize {
        self.tables().user_projects.len()
    }
}

/// 基于内存存储组装的应用状态，密码哈希使用低开销参数
pub fn memory_app_state(store: &Arc<MemoryStore>) -> AppState {
    AppState {
        project_service: Arc::new(ProjectService::new(store.clone(), store.clone(), store.clone()))
            as Arc<dyn ProjectServiceTrait>,
        sprint_service: Arc::new(SprintService::new(store.clone())) as Arc<dyn SprintServiceTrait>,
        user_service: Arc::new(UserService::new(store.clone(), fast_hasher())) as Arc<dyn UserServiceTrait>,
    }
}

pub fn fast_hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_params(1024, 1).unwrap()
}

fn missing(entity: &str, id: i32) -> DatabaseError {
    DatabaseError::not_found(entity, id)
}

#[async_trait::async_trait]
impl RepositoryTrait<Project> for MemoryStore {
    async fn save(&self, project: Project) -> DatabaseResult<Project> {
        let mut tables = self.tables();
        let id = match project.id {
            Some(id) if tables.projects.contains_key(&id) => id,
            Some(id) => return Err(missing("Project", id)),
            None => tables.next_id(),
        };
        let saved = Project { id: Some(id), ..project };
        tables.projects.insert(id, saved.without_relations());
        Ok(saved)
    }

    async fn find_all(&self, relations: &[ProjectRelation]) -> DatabaseResult<Vec<Project>> {
        let tables = self.tables();
        Ok(tables.projects.values().cloned().map(|p| tables.resolve_project(p, relations)).collect())
    }

    async fn find_by_id(&self, id: i32, relations: &[ProjectRelation]) -> DatabaseResult<Option<Project>> {
        let tables = self.tables();
        Ok(tables.projects.get(&id).cloned().map(|p| tables.resolve_project(p, relations)))
    }

    async fn find_by(&self, filter: &ProjectFilter, relations: &[ProjectRelation]) -> DatabaseResult<Vec<Project>> {
        let tables = self.tables();
        Ok(tables
            .projects
            .values()
            .filter(|p| filter.name.as_ref().map_or(true, |n| &p.name == n))
            .filter(|p| filter.deleted.map_or(true, |d| p.deleted == d))
            .cloned()
            .map(|p| tables.resolve_project(p, relations))
            .collect())
    }
}

#[async_trait::async_trait]
impl RepositoryTrait<Sprint> for MemoryStore {
    async fn save(&self, sprint: Sprint) -> DatabaseResult<Sprint> {
        let mut tables = self.tables();
        let id = match sprint.id {
            Some(id) if tables.sprints.contains_key(&id) => id,
            Some(id) => return Err(missing("Sprint", id)),
            None => tables.next_id(),
        };
        let saved = Sprint { id: Some(id), ..sprint };
        tables.sprints.insert(id, Sprint { events: Vec::new(), ..saved.clone() });
        Ok(saved)
    }

    async fn find_all(&self, relations: &[SprintRelation]) -> DatabaseResult<Vec<Sprint>> {
        let tables = self.tables();
        Ok(tables.sprints.values().cloned().map(|s| tables.resolve_sprint(s, relations)).collect())
    }

    async fn find_by_id(&self, id: i32, relations: &[SprintRelation]) -> DatabaseResult<Option<Sprint>> {
        let tables = self.tables();
        Ok(tables.sprints.get(&id).cloned().map(|s| tables.resolve_sprint(s, relations)))
    }

    async fn find_by(&self, filter: &SprintFilter, relations: &[SprintRelation]) -> DatabaseResult<Vec<Sprint>> {
        let tables = self.tables();
        Ok(tables
            .sprints
            .values()
            .filter(|s| filter.project_id.map_or(true, |p| s.project_id == Some(p)))
            .filter(|s| filter.deleted.map_or(true, |d| s.deleted == d))
            .cloned()
            .map(|s| tables.resolve_sprint(s, relations))
            .collect())
    }
}

#[async_trait::async_trait]
impl RepositoryTrait<User> for MemoryStore {
    async fn save(&self, user: User) -> DatabaseResult<User> {
        let mut tables = self.tables();
        let id = match user.id {
            Some(id) if tables.users.contains_key(&id) => id,
            Some(id) => return Err(missing("User", id)),
            None => tables.next_id(),
        };
        // 与 users.email 的唯一约束保持一致
        if tables.users.values().any(|u| u.email == user.email && u.id != Some(id)) {
            return Err(DatabaseError::validation(format!("邮箱已被使用: {}", user.email)));
        }
        let saved = User { id: Some(id), ..user };
        tables.users.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_all(&self, _relations: &[UserRelation]) -> DatabaseResult<Vec<User>> {
        Ok(self.tables().users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32, _relations: &[UserRelation]) -> DatabaseResult<Option<User>> {
        Ok(self.tables().users.get(&id).cloned())
    }

    async fn find_by(&self, filter: &UserFilter, _relations: &[UserRelation]) -> DatabaseResult<Vec<User>> {
        Ok(self
            .tables()
            .users
            .values()
            .filter(|u| filter.email.as_ref().map_or(true, |e| &u.email == e))
            .filter(|u| filter.deleted.map_or(true, |d| u.deleted == d))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RepositoryTrait<UserProject> for MemoryStore {
    async fn save(&self, member: UserProject) -> DatabaseResult<UserProject> {
        let mut tables = self.tables();
        let id = match member.id {
            Some(id) if tables.user_projects.contains_key(&id) => id,
            Some(id) => return Err(missing("UserProject", id)),
            None => tables.next_id(),
        };
        let saved = UserProject { id: Some(id), ..member };
        tables.user_projects.insert(
            id,
            UserProject {
                user: None,
                project: None,
                ..saved.clone()
            },
        );
        Ok(saved)
    }

    async fn find_all(&self, relations: &[UserProjectRelation]) -> DatabaseResult<Vec<UserProject>> {
        let tables = self.tables();
        Ok(tables.user_projects.values().cloned().map(|m| tables.resolve_member(m, relations)).collect())
    }

    async fn find_by_id(&self, id: i32, relations: &[UserProjectRelation]) -> DatabaseResult<Option<UserProject>> {
        let tables = self.tables();
        Ok(tables.user_projects.get(&id).cloned().map(|m| tables.resolve_member(m, relations)))
    }

    async fn find_by(
        &self,
        filter: &UserProjectFilter,
        relations: &[UserProjectRelation],
    ) -> DatabaseResult<Vec<UserProject>> {
        let tables = self.tables();
        Ok(tables
            .user_projects
            .values()
            .filter(|m| filter.project_id.map_or(true, |p| m.project_id == p))
            .filter(|m| filter.user_id.map_or(true, |u| m.user_id == u))
            .cloned()
            .map(|m| tables.resolve_member(m, relations))
            .collect())
    }
}
