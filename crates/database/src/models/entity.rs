//! 实体公共能力
//!
//! 所有实体都需要实现 [`Entity`]，支持软删除的实体再实现 [`SoftDelete`]，
//! 带创建/更新时间的实体实现 [`Timestamped`]。

use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::fmt::Debug;

/// 实体trait
///
/// - `Relation`: 查询时可以预加载的关联关系
/// - `Filter`: 按条件查询时使用的过滤器，字段为 `None` 时表示不限制
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Relation: Copy + PartialEq + Debug + Send + Sync + 'static;
    type Filter: Default + Debug + Send + Sync + 'static;

    /// 实体名称，用于日志与错误信息
    const NAME: &'static str;

    /// 实体ID，首次保存之前为 `None`
    fn id(&self) -> Option<i32>;
}

/// 软删除能力，删除时只打标记，不会物理删除数据
pub trait SoftDelete {
    fn is_deleted(&self) -> bool;

    fn mark_deleted(&mut self);
}

/// 创建时间/最后更新时间由服务端写入
pub trait Timestamped {
    fn last_update(&self) -> DateTime<Utc>;

    /// 设置创建时间和最后更新时间
    fn stamp_creation(&mut self, at: DateTime<Utc>);

    /// 刷新最后更新时间
    fn touch(&mut self, at: DateTime<Utc>);
}

/// 当前时间，精度截断到微秒，与PostgreSQL的 `timestamptz` 精度一致
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// 严格晚于 `previous` 的当前时间
///
/// 同一微秒内的连续更新会顺延一微秒，保证 `last_update` 单调递增
pub fn now_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn now_is_truncated_to_microseconds() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }

    #[test]
    fn now_after_is_strictly_later() {
        let future = now() + Duration::seconds(30);
        assert_eq!(now_after(future), future + Duration::microseconds(1));

        let past = now() - Duration::seconds(30);
        assert!(now_after(past) > past);
    }
}
