//! 用户数据库模型

use crate::models::entity::{Entity, SoftDelete, Timestamped};
use chrono::{DateTime, Utc};

/// 用户信息结构体
///
/// `password` 保存的是哈希后的密码
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub creation_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,
}

/// 用户注册参数，`password` 为明文
#[derive(Debug, Clone, Default)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
}

/// 邮箱 `@` 之前的部分，没有 `@` 时返回整个字符串
pub fn email_local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

/// 用户没有可预加载的关联关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRelation {}

/// 用户查询过滤器
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub email: Option<String>,
    pub deleted: Option<bool>,
}

impl Entity for User {
    type Relation = UserRelation;
    type Filter = UserFilter;

    const NAME: &'static str = "User";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

impl SoftDelete for User {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

impl Timestamped for User {
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
