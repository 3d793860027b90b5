use serde::{Deserialize, Serialize};
use std::io;
use utils_common::compression;

use crate::error::{BlogListError, Result};

/// 页面数据包支持的最大主版本号
pub const BUNDLE_MAX_VERSION: u8 = 1;

/// 页面数据包写入时使用的版本号
pub const BUNDLE_VERSION: [u8; 2] = [1, 0];

/// 单个博客允许的最大页数
pub const MAX_PAGES: u32 = 10_000;

/// 特色图片引用 - 对本组件是不透明的
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    /// 图片地址
    pub src: String,
    /// 布局宽度
    pub width: u32,
    /// 布局高度
    pub height: u32,
}

/// 文章记录 - 列表页展示一篇文章所需的元数据
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// 文章唯一标识符，用作卡片的 key
    pub id: String,
    /// 文章标题
    pub title: String,
    /// 摘要（上游已截断）
    #[serde(default)]
    pub excerpt: String,
    /// 格式化后的展示日期，例如 "January 05, 2023"，同时是筛选的匹配目标
    #[serde(default)]
    pub date: Option<String>,
    /// 文章路由路径
    pub slug: String,
    /// 特色图片
    #[serde(default)]
    pub featured_image: Option<ImageRef>,
}

impl PostRecord {
    /// 非空的日期文本
    pub fn display_date(&self) -> Option<&str> {
        self.date.as_deref().filter(|date| !date.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageContextRepr {
    current_page: u32,
    num_pages: u32,
}

/// 页码上下文 - 构建时为每个分页实例分配
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "PageContextRepr")]
pub struct PageContext {
    current_page: u32,
    num_pages: u32,
}

impl PageContext {
    /// 创建页码上下文，页码从1开始且不超过总页数，总页数不超过 `MAX_PAGES`
    pub fn new(current_page: u32, num_pages: u32) -> Result<Self> {
        if current_page == 0 || num_pages == 0 || current_page > num_pages || num_pages > MAX_PAGES {
            return Err(BlogListError::InvalidPageContext { current_page, num_pages });
        }
        Ok(Self { current_page, num_pages })
    }

    /// 当前页码
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// 总页数
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }
}

impl TryFrom<PageContextRepr> for PageContext {
    type Error = BlogListError;

    fn try_from(repr: PageContextRepr) -> Result<Self> {
        PageContext::new(repr.current_page, repr.num_pages)
    }
}

/// 页面数据包 - 一页文章及其页码上下文
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageBundle {
    /// 本页文章，已按发布时间倒序
    pub posts: Vec<PostRecord>,
    /// 页码上下文
    pub page_context: PageContext,
}

impl PageBundle {
    /// 从压缩的二进制数据恢复页面数据包
    pub fn from_compressed(data: &[u8]) -> Result<Self> {
        let bundle = compression::from_compressed_with_max_version(data, BUNDLE_MAX_VERSION)?;
        Ok(bundle)
    }

    /// 序列化为压缩的二进制数据
    pub fn to_compressed(&self) -> std::result::Result<Vec<u8>, io::Error> {
        compression::to_compressed(self, BUNDLE_VERSION)
    }

    /// 从 JSON 解析，格式为 `{ "posts": [...], "pageContext": {...} }`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn default_blog_slug() -> String {
    "/blog/".to_string()
}

fn default_heading() -> String {
    "Projects".to_string()
}

fn default_description_prefix() -> String {
    "Stackrole base blog page".to_string()
}

/// 博客列表页配置
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogConfig {
    /// 博客根路径，分页链接以此为前缀
    #[serde(default = "default_blog_slug")]
    pub blog_slug: String,
    /// 页面主标题
    #[serde(default = "default_heading")]
    pub heading: String,
    /// 页面描述前缀
    #[serde(default = "default_description_prefix")]
    pub description_prefix: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            blog_slug: default_blog_slug(),
            heading: default_heading(),
            description_prefix: default_description_prefix(),
        }
    }
}

impl BlogConfig {
    /// 从 JSON 解析配置，缺失的字段使用默认值
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_context_rejects_out_of_range_pages() {
        assert!(PageContext::new(0, 3).is_err());
        assert!(PageContext::new(1, 0).is_err());
        assert!(PageContext::new(4, 3).is_err());
        assert!(PageContext::new(3, 3).is_ok());
    }

    #[test]
    fn page_context_rejects_unbounded_page_counts() {
        assert!(PageContext::new(MAX_PAGES, MAX_PAGES).is_ok());
        assert!(PageContext::new(1, MAX_PAGES + 1).is_err());
        assert!(PageContext::new(u32::MAX, u32::MAX).is_err());

        let json = format!(
            r#"{{ "posts": [], "pageContext": {{ "currentPage": 1, "numPages": {} }} }}"#,
            u32::MAX
        );
        assert!(PageBundle::from_json(&json).is_err());
    }

    #[test]
    fn bundle_json_uses_camel_case() -> Result<()> {
        let json = r#"{
            "posts": [
                {
                    "id": "a",
                    "title": "First",
                    "excerpt": "hello",
                    "date": "January 05, 2023",
                    "slug": "/first/",
                    "featuredImage": { "src": "/img/a.png", "width": 345, "height": 260 }
                },
                { "id": "b", "title": "Second", "slug": "/second/" }
            ],
            "pageContext": { "currentPage": 2, "numPages": 4 }
        }"#;

        let bundle = PageBundle::from_json(json)?;
        assert_eq!(bundle.page_context.current_page(), 2);
        assert_eq!(bundle.page_context.num_pages(), 4);
        assert_eq!(bundle.posts[0].display_date(), Some("January 05, 2023"));
        assert_eq!(bundle.posts[0].featured_image.as_ref().map(|i| i.width), Some(345));
        assert_eq!(bundle.posts[1].date, None);
        Ok(())
    }

    #[test]
    fn bundle_json_with_invalid_context_fails() {
        let json = r#"{ "posts": [], "pageContext": { "currentPage": 0, "numPages": 1 } }"#;
        assert!(PageBundle::from_json(json).is_err());
    }

    #[test]
    fn compressed_bundle_can_be_read_back() -> Result<()> {
        let bundle = PageBundle {
            posts: vec![PostRecord {
                id: "a".to_string(),
                title: "First".to_string(),
                excerpt: String::new(),
                date: Some("March 01, 2022".to_string()),
                slug: "/first/".to_string(),
                featured_image: None,
            }],
            page_context: PageContext::new(1, 1)?,
        };

        let data = bundle.to_compressed()?;
        assert_eq!(PageBundle::from_compressed(&data)?, bundle);
        Ok(())
    }

    #[test]
    fn config_fills_missing_fields() -> Result<()> {
        let config = BlogConfig::from_json(r#"{ "blogSlug": "/projects/" }"#)?;
        assert_eq!(config.blog_slug, "/projects/");
        assert_eq!(config.heading, "Projects");
        assert_eq!(config.description_prefix, "Stackrole base blog page");
        Ok(())
    }

    #[test]
    fn empty_date_is_not_a_display_date() {
        let post = PostRecord {
            id: "x".to_string(),
            title: "X".to_string(),
            excerpt: String::new(),
            date: Some(String::new()),
            slug: "/x/".to_string(),
            featured_image: None,
        };
        assert_eq!(post.display_date(), None);
    }
}
