//! 通用仓库 trait 定义
//!
//! 定义单个实体的持久化接口

use crate::models::Entity;
use crate::DatabaseResult;

/// 通用仓库trait定义
///
/// 支持：
/// - 保存（没有ID时插入，有ID时整体覆盖更新）
/// - 查询全部（可预加载关联关系）
/// - 根据ID查询（可预加载关联关系）
/// - 根据过滤条件查询
#[async_trait::async_trait]
pub trait RepositoryTrait<T: Entity>: Send + Sync + 'static {
    /// 保存实体
    ///
    /// # 参数
    /// - `entity`: 要保存的实体，`id` 为 `None` 时插入
    ///
    /// # 返回值
    /// 返回保存后的实体，新插入的实体会带上数据库分配的ID。
    /// 更新不存在的ID时返回 `RowNotFound`。
    async fn save(&self, entity: T) -> DatabaseResult<T>;

    /// 查询全部实体，按ID升序
    ///
    /// # 参数
    /// - `relations`: 需要预加载的关联关系
    async fn find_all(&self, relations: &[T::Relation]) -> DatabaseResult<Vec<T>>;

    /// 根据 ID 查询实体
    ///
    /// # 返回值
    /// 不存在时返回 `None`
    async fn find_by_id(&self, id: i32, relations: &[T::Relation]) -> DatabaseResult<Option<T>>;

    /// 根据过滤条件查询实体，按ID升序
    async fn find_by(&self, filter: &T::Filter, relations: &[T::Relation]) -> DatabaseResult<Vec<T>>;
}
