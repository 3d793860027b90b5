use serde::Serialize;

use crate::filter::FilterButtonView;
use crate::models::PostRecord;
use crate::pagination::PaginationView;

/// 页面头部元数据（交给宿主的 Seo 组件）
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SeoView {
    pub title: String,
    pub description: String,
}

/// 文章卡片描述，key 取文章 id 以保持重渲染时的稳定标识
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostCardView {
    pub key: String,
    pub data: PostRecord,
}

impl From<&PostRecord> for PostCardView {
    fn from(post: &PostRecord) -> Self {
        Self {
            key: post.id.clone(),
            data: post.clone(),
        }
    }
}

/// 整个博客列表页的渲染结果
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BlogIndexView {
    pub seo: SeoView,
    pub heading: String,
    pub filters: Vec<FilterButtonView>,
    pub posts: Vec<PostCardView>,
    /// 没有文章时为 None
    pub pagination: Option<PaginationView>,
}
