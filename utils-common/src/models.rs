use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 页面类型 - 来自页面的 og:type 标签
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// 博客文章（blog-post 模板）
    Article,
    /// 普通页面
    Page,
    /// 无法识别的页面
    #[default]
    Unknown,
}

impl PageType {
    /// 从 og:type 的取值解析页面类型
    pub fn from_og_type(value: &str) -> Self {
        match value.trim() {
            "article" => PageType::Article,
            "page" => PageType::Page,
            _ => PageType::Unknown,
        }
    }
}

/// 源文章 - 索引工具从已渲染页面中提取的原始数据
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SourcePost {
    /// 文章唯一标识符（相对路径）
    pub id: String,
    /// 文章标题
    pub title: String,
    /// 正文纯文本，用于生成摘要
    #[serde(default)]
    pub content: String,
    /// 发布时间，缺失时为 None
    pub published: Option<DateTime<Utc>>,
    /// 文章路由路径
    pub slug: String,
    /// 特色图片地址
    pub image: Option<String>,
    /// 页面类型
    #[serde(default)]
    pub page_type: PageType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_type_values_map_to_page_types() {
        assert_eq!(PageType::from_og_type("article"), PageType::Article);
        assert_eq!(PageType::from_og_type(" page "), PageType::Page);
        assert_eq!(PageType::from_og_type("website"), PageType::Unknown);
    }
}
