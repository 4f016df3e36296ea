//! 迭代中的事件

use chrono::{DateTime, Utc};

/// 迭代事件，归属于某个迭代
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Event {
    pub id: i32,
    pub sprint_id: i32,
    pub name: String,
    pub date: Option<DateTime<Utc>>,
}
