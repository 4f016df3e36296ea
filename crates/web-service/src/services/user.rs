//! 用户服务

use crate::services::crud::CrudService;
use crate::services::error::ServiceResult;
use crate::services::password::{Argon2PasswordHasher, PasswordHasherTrait};
use crate::services::traits::UserServiceTrait;
use database::models::{email_local_part, now, now_after};
use database::{RepositoryTrait, Timestamped, User, UserCreate, UserFilter};
use std::sync::Arc;
use tracing::debug;

/// 用户服务
pub struct UserService<UR: RepositoryTrait<User>, H: PasswordHasherTrait = Argon2PasswordHasher> {
    users: CrudService<User, UR>,
    hasher: H,
}

impl<UR: RepositoryTrait<User>, H: PasswordHasherTrait> UserService<UR, H> {
    pub fn new(user_repository: Arc<UR>, hasher: H) -> Self {
        Self {
            users: CrudService::new(user_repository, &[]),
            hasher,
        }
    }
}

#[async_trait::async_trait]
impl<UR: RepositoryTrait<User>, H: PasswordHasherTrait> UserServiceTrait for UserService<UR, H> {
    async fn create(&self, user: UserCreate) -> ServiceResult<User> {
        let UserCreate { email, password } = user;
        debug!("📝 注册用户: {}", email);

        let name = email_local_part(&email).to_string();
        let password = self.hasher.hash(&password)?;
        let at = now();

        self.users
            .create(User {
                id: None,
                name,
                email,
                password,
                creation_date: at,
                last_update: at,
                deleted: false,
            })
            .await
    }

    async fn find_all(&self) -> ServiceResult<Vec<User>> {
        self.users.find_all().await
    }

    async fn find_one(&self, id: i32) -> ServiceResult<Option<User>> {
        self.users.find_optional(id).await
    }

    async fn find_one_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let filter = UserFilter {
            email: Some(email.to_string()),
            ..Default::default()
        };
        Ok(self.users.find_by(&filter).await?.into_iter().next())
    }

    async fn save(&self, mut user: User) -> ServiceResult<User> {
        let at = now_after(user.last_update());
        user.touch(at);
        self.users.save(user).await
    }

    async fn delete(&self, user: User) -> ServiceResult<User> {
        self.users.delete(user).await
    }

    fn verify_password(&self, user: &User, password: &str) -> bool {
        self.hasher.verify(password, &user.password)
    }
}
