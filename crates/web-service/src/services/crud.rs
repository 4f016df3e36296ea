//! 通用增删改查服务
//!
//! 项目、迭代、用户服务都是对同一种 CRUD 形态的封装，这里用一个按实体类型参数化的
//! [`CrudService`] 实现，具体服务只需要指定仓库和需要预加载的关联关系。

use crate::services::error::{ServiceError, ServiceResult};
use database::models::now;
use database::{Entity, RepositoryTrait, SoftDelete, Timestamped};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// 基于仓库的通用 CRUD 服务
///
/// - `T`: 实体类型
/// - `R`: 实体对应的仓库
///
/// 查询时总是预加载构造时指定的 `relations`
pub struct CrudService<T: Entity, R> {
    repository: Arc<R>,
    relations: Vec<T::Relation>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, R> Clone for CrudService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            relations: self.relations.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T, R> CrudService<T, R>
where
    T: Entity,
    R: RepositoryTrait<T>,
{
    pub fn new(repository: Arc<R>, relations: &[T::Relation]) -> Self {
        Self {
            repository,
            relations: relations.to_vec(),
            _entity: PhantomData,
        }
    }

    /// 底层仓库
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// 写入创建时间/更新时间后保存
    pub async fn create(&self, mut entity: T) -> ServiceResult<T>
    where
        T: Timestamped,
    {
        entity.stamp_creation(now());
        debug!("📝 创建 {}: {:?}", T::NAME, entity);

        Ok(self.repository.save(entity).await?)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<T>> {
        Ok(self.repository.find_all(&self.relations).await?)
    }

    /// 根据ID查询，不存在时返回 `None`
    pub async fn find_optional(&self, id: i32) -> ServiceResult<Option<T>> {
        Ok(self.repository.find_by_id(id, &self.relations).await?)
    }

    /// 根据ID查询，不存在时返回 [`ServiceError::NotFound`]
    pub async fn find_one(&self, id: i32) -> ServiceResult<T> {
        self.find_optional(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(T::NAME, id))
    }

    pub async fn find_by(&self, filter: &T::Filter) -> ServiceResult<Vec<T>> {
        Ok(self.repository.find_by(filter, &self.relations).await?)
    }

    /// 原样保存调用方传入的实体（整体覆盖）
    pub async fn save(&self, entity: T) -> ServiceResult<T> {
        Ok(self.repository.save(entity).await?)
    }

    /// 软删除：只打删除标记并保存
    ///
    /// 已经标记删除的实体直接返回，不再写入
    pub async fn delete(&self, mut entity: T) -> ServiceResult<T>
    where
        T: SoftDelete,
    {
        if entity.is_deleted() {
            debug!("⏭️ {} {:?} 已删除，跳过", T::NAME, entity.id());
            return Ok(entity);
        }

        debug!("🗑️ 删除 {}: {:?}", T::NAME, entity.id());

        entity.mark_deleted();
        Ok(self.repository.save(entity).await?)
    }
}
