//! 密码哈希
//!
//! 使用 Argon2id 加盐哈希，工作因子（迭代次数）可配置

use crate::services::error::{ServiceError, ServiceResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// 默认内存开销 19 MiB
const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;

/// 密码哈希 trait
pub trait PasswordHasherTrait: Send + Sync + 'static {
    /// 生成加盐哈希
    fn hash(&self, password: &str) -> ServiceResult<String>;

    /// 校验明文密码与哈希是否匹配
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id 实现
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// 使用默认内存开销（19 MiB）和指定的迭代次数
    ///
    /// `cost` 是 Argon2id 的迭代次数（`t_cost`），配置默认值为 2。
    /// 它与 bcrypt 的 cost（如常见的 10，指数级轮数）不是同一个量纲，不能直接换算。
    pub fn new(cost: u32) -> ServiceResult<Self> {
        Self::with_params(DEFAULT_MEMORY_KIB, cost)
    }

    pub fn with_params(memory_kib: u32, cost: u32) -> ServiceResult<Self> {
        let params = Params::new(memory_kib, cost, 1, None)
            .map_err(|e| ServiceError::PasswordHash(format!("Invalid params: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self { params: Params::default() }
    }
}

impl PasswordHasherTrait for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::PasswordHash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        // 参数编码在哈希字符串中，校验时以哈希中的参数为准
        PasswordHash::new(hash)
            .map(|parsed| self.argon2().verify_password(password.as_bytes(), &parsed).is_ok())
            .unwrap_or(false)
    }
}
