//! 用户接口数据
//!
//! 返回给前端的 [`UserInfo`] 不包含密码哈希

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 注册用户
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UserCreate {
    #[schema(example = "alice@example.com")]
    #[validate(email)]
    /// 用户邮箱，邮箱 `@` 之前的部分会作为用户名称
    pub email: String,

    #[schema(example = "correct horse battery")]
    #[validate(length(min = 8, max = 128))]
    /// 明文密码，只用于生成哈希
    pub password: String,
}

impl From<UserCreate> for database::UserCreate {
    fn from(user: UserCreate) -> Self {
        Self {
            email: user.email,
            password: user.password,
        }
    }
}

/// 更新用户信息，未填写的字段保持不变
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UserUpdate {
    #[schema(example = "alice")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[schema(example = "alice@example.org")]
    #[validate(email)]
    pub email: Option<String>,
}

impl UserUpdate {
    pub fn apply(self, user: &mut database::User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct UserInfo {
    #[schema(example = 3)]
    /// 用户ID
    pub id: i32,

    #[schema(example = "alice")]
    pub name: String,

    #[schema(example = "alice@example.com")]
    pub email: String,

    pub creation_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub deleted: bool,
}

impl From<database::User> for UserInfo {
    fn from(user: database::User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            name: user.name,
            email: user.email,
            creation_date: user.creation_date,
            last_update: user.last_update,
            deleted: user.deleted,
        }
    }
}
