use crate::error::Result;
use crate::filter::{FilterControl, FilterSelection};
use crate::models::{BlogConfig, PageBundle, PageContext, PostRecord};
use crate::pagination::PaginationProps;
use crate::view::{BlogIndexView, PostCardView, SeoView};

/// 计算当前可见的文章
///
/// 先丢弃没有日期的文章，再按筛选值做子串匹配。
/// 结果是输入的子序列，保持原有顺序。
pub fn derive_view(posts: &[PostRecord], selection: FilterSelection) -> Vec<&PostRecord> {
    posts
        .iter()
        .filter_map(|post| post.display_date().map(|date| (post, date)))
        .filter(|(_, date)| selection.matches(date))
        .map(|(post, _)| post)
        .collect()
}

/// 博客列表页 - 持有唯一的可变状态：当前筛选值
#[derive(Debug, Clone)]
pub struct BlogIndexPage {
    posts: Vec<PostRecord>,
    context: PageContext,
    config: BlogConfig,
    filter_control: FilterControl,
    filter: FilterSelection,
}

impl BlogIndexPage {
    pub fn new(bundle: PageBundle, config: BlogConfig) -> Self {
        Self {
            posts: bundle.posts,
            context: bundle.page_context,
            config,
            filter_control: FilterControl::new(),
            filter: FilterSelection::All,
        }
    }

    /// 当前筛选值
    pub fn filter(&self) -> FilterSelection {
        self.filter
    }

    pub fn context(&self) -> PageContext {
        self.context
    }

    /// 用户点击筛选按钮 - 状态的唯一更新入口
    ///
    /// 选中值经由筛选控件回调回到页面；`notify` 在页面状态更新后被调用。
    pub fn handle_filter_change<F>(&mut self, selection: FilterSelection, mut notify: F)
    where
        F: FnMut(FilterSelection),
    {
        let filter = &mut self.filter;
        self.filter_control.activate(selection, |value| {
            *filter = value;
            notify(value);
        });
    }

    /// 按宿主传入的原始筛选值更新状态
    ///
    /// 集合外的值返回错误，此时状态不变，回调也不会被调用。
    pub fn select_value<F>(&mut self, value: Option<&str>, notify: F) -> Result<FilterSelection>
    where
        F: FnMut(FilterSelection),
    {
        let selection = FilterSelection::parse(value)?;
        self.handle_filter_change(selection, notify);
        Ok(selection)
    }

    /// 当前可见的文章，每次调用都重新计算
    pub fn visible_posts(&self) -> Vec<&PostRecord> {
        derive_view(&self.posts, self.filter)
    }

    /// 页面标题
    pub fn title(&self) -> String {
        format!(
            "Blog — Page {} of {}",
            self.context.current_page(),
            self.context.num_pages()
        )
    }

    /// 页面描述
    pub fn description(&self) -> String {
        format!(
            "{} {} of {}",
            self.config.description_prefix,
            self.context.current_page(),
            self.context.num_pages()
        )
    }

    /// 渲染整个页面
    pub fn render(&self) -> BlogIndexView {
        let posts: Vec<PostCardView> = self
            .visible_posts()
            .into_iter()
            .map(PostCardView::from)
            .collect();

        let pagination = PaginationProps::new(self.context, &self.config.blog_slug, posts.len())
            .render();

        BlogIndexView {
            seo: SeoView {
                title: self.title(),
                description: self.description(),
            },
            heading: self.config.heading.clone(),
            filters: self.filter_control.buttons(),
            posts,
            pagination,
        }
    }
}
