use utils_common::models::{PageType, SourcePost};
use crate::models::{ImageRef, PageBundle, PageContext, PostRecord};
use std::fs;
use std::path::Path;

/// 摘要最大字符数
pub const EXCERPT_PRUNE_LENGTH: usize = 250;

/// 卡片图片的固定布局尺寸
pub const CARD_IMAGE_WIDTH: u32 = 345;
pub const CARD_IMAGE_HEIGHT: u32 = 260;

/// 日期展示格式，例如 "January 05, 2023"
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// 默认每页文章数
pub const DEFAULT_POSTS_PER_PAGE: usize = 9;

/// 截断摘要：在单词边界截断并追加省略号，总长度不超过上限
pub fn prune_excerpt(content: &str, max_chars: usize) -> String {
    let text = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= max_chars {
        return text;
    }

    // 留一个字符给省略号
    let budget = max_chars.saturating_sub(1);
    let cut = text
        .char_indices()
        .nth(budget)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let head = &text[..cut];

    // 截断点正好落在单词中间时回退到上一个空格
    let head = if text[cut..].starts_with(' ') {
        head
    } else {
        head.rfind(' ').map(|idx| &head[..idx]).unwrap_or(head)
    };

    format!("{}…", head.trim_end())
}

/// 把源文章转换为列表页使用的文章记录
pub fn to_record(post: SourcePost) -> PostRecord {
    PostRecord {
        excerpt: prune_excerpt(&post.content, EXCERPT_PRUNE_LENGTH),
        date: post.published.map(|date| date.format(DATE_FORMAT).to_string()),
        featured_image: post.image.map(|src| ImageRef {
            src,
            width: CARD_IMAGE_WIDTH,
            height: CARD_IMAGE_HEIGHT,
        }),
        id: post.id,
        title: post.title,
        slug: post.slug,
    }
}

/// 页面数据包构建器
pub struct PageBundleBuilder {
    posts: Vec<SourcePost>,
    per_page: usize,
}

impl PageBundleBuilder {
    /// 创建新的构建器，每页至少一篇
    pub fn new(per_page: usize) -> Self {
        Self {
            posts: Vec::new(),
            per_page: per_page.max(1),
        }
    }

    /// 添加文章到构建器
    pub fn add_post(&mut self, post: SourcePost) {
        self.posts.push(post);
    }

    /// 构建所有分页的数据包
    pub fn build_pages(&self) -> Result<Vec<PageBundle>, String> {
        // 只保留博客文章
        let mut posts: Vec<SourcePost> = self.posts
            .iter()
            .filter(|post| post.page_type == PageType::Article)
            .cloned()
            .collect();

        if posts.is_empty() {
            return Err("无法构建分页: 没有文章数据".to_string());
        }

        // 按发布时间倒序，稳定排序；没有日期的排在最后
        posts.sort_by(|a, b| b.published.cmp(&a.published));

        let num_pages = u32::try_from(posts.len().div_ceil(self.per_page))
            .map_err(|_| "分页数量过多".to_string())?;

        let mut pages = Vec::with_capacity(num_pages as usize);
        let mut records = posts.into_iter().map(to_record).peekable();
        let mut current_page = 1;

        while records.peek().is_some() {
            let chunk: Vec<PostRecord> = records.by_ref().take(self.per_page).collect();
            let page_context = PageContext::new(current_page, num_pages)
                .map_err(|e| e.to_string())?;
            pages.push(PageBundle { posts: chunk, page_context });
            current_page += 1;
        }

        Ok(pages)
    }

    /// 构建并保存所有分页，返回写入的页数
    pub fn save_pages(&self, output_dir: &Path) -> Result<usize, String> {
        let pages = self.build_pages()?;

        println!("开始保存分页数据，文章: {}，页数: {}", self.posts.len(), pages.len());

        for bundle in &pages {
            let path = output_dir.join(page_file_name(bundle.page_context.current_page()));

            let data = bundle.to_compressed()
                .map_err(|e| format!("压缩第 {} 页数据失败: {}", bundle.page_context.current_page(), e))?;

            fs::write(&path, &data)
                .map_err(|e| format!("无法写入分页文件 {}: {}", path.display(), e))?;

            println!("已写入: {}，大小: {} 字节", path.display(), data.len());
        }

        Ok(pages.len())
    }
}

/// 第 page 页数据包的文件名
pub fn page_file_name(page: u32) -> String {
    format!("blog_page_{}.bin", page)
}
