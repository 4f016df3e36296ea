//! 工作空间模型，项目只持有对它的引用

/// 工作空间
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Workspace {
    pub id: i32,
    pub name: String,
}
