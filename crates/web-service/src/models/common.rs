use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 封装符合json-api的单个返回对象
///
/// 具体参考：<https://jsonapi.org>
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct Reply<T> {
    pub data: T,
}

/// 封装符合json-api的列表对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ReplyList<T> {
    pub data: Vec<T>,

    #[schema(example = 146)]
    /// 列表总数
    pub total: u32,
}

impl<T> ReplyList<T> {
    /// 将实体列表转换为返回对象
    pub fn from_items<S: Into<T>>(items: Vec<S>) -> Self {
        let data: Vec<T> = items.into_iter().map(Into::into).collect();
        Self {
            total: data.len() as u32,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_list_counts_items() {
        let list: ReplyList<String> = ReplyList::from_items(vec!["a", "b", "c"]);

        assert_eq!(list.total, 3);
        assert_eq!(list.data, ["a", "b", "c"]);
    }
}
