use serde::Serialize;

use crate::models::PageContext;

/// 上一页/下一页链接
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    /// 链接文字
    pub label: &'static str,
    /// 目标路径
    pub to: String,
    /// rel 属性: prev / next
    pub rel: &'static str,
}

/// 页码链接
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageNumberView {
    /// 列表项 key
    pub key: String,
    /// 页码（从1开始）
    pub page: u32,
    /// 目标路径
    pub to: String,
    /// 是否为当前页
    pub active: bool,
    /// 样式类名
    pub class_name: &'static str,
}

/// 分页控件的渲染结果
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub previous: Option<NavLinkView>,
    pub pages: Vec<PageNumberView>,
    pub next: Option<NavLinkView>,
}

/// 分页控件参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationProps {
    pub current_page: u32,
    pub num_pages: u32,
    pub is_first: bool,
    pub is_last: bool,
    pub prev_page: String,
    pub next_page: String,
    pub blog_slug: String,
    /// 筛选后的文章数量
    pub post_count: usize,
}

impl PaginationProps {
    /// 根据页码上下文计算链接目标
    pub fn new(context: PageContext, blog_slug: &str, post_count: usize) -> Self {
        let current_page = context.current_page();
        let num_pages = context.num_pages();

        // 第1页时得到 "{slug}0"，但 is_first 会阻止它被渲染
        let prev_page = if current_page - 1 == 1 {
            blog_slug.to_string()
        } else {
            format!("{}{}", blog_slug, current_page - 1)
        };
        let next_page = format!("{}{}", blog_slug, current_page.saturating_add(1));

        Self {
            current_page,
            num_pages,
            is_first: current_page == 1,
            is_last: current_page == num_pages,
            prev_page,
            next_page,
            blog_slug: blog_slug.to_string(),
            post_count,
        }
    }

    /// 第 page 页的链接目标，第1页是不带页码的博客根路径
    pub fn page_target(&self, page: u32) -> String {
        if page == 1 {
            self.blog_slug.clone()
        } else {
            format!("{}{}", self.blog_slug, page)
        }
    }

    /// 渲染分页；没有文章时不渲染
    pub fn render(&self) -> Option<PaginationView> {
        if self.post_count == 0 {
            return None;
        }

        let previous = (!self.is_first).then(|| NavLinkView {
            label: "Previous",
            to: self.prev_page.clone(),
            rel: "prev",
        });

        let pages = (1..=self.num_pages)
            .map(|page| {
                let active = page == self.current_page;
                PageNumberView {
                    key: format!("pagination-number{}", page),
                    page,
                    to: self.page_target(page),
                    active,
                    class_name: if active { "is-active num" } else { "num" },
                }
            })
            .collect();

        let next = (!self.is_last).then(|| NavLinkView {
            label: "Next",
            to: self.next_page.clone(),
            rel: "next",
        });

        Some(PaginationView { previous, pages, next })
    }
}
