use std::collections::HashMap;
use std::fs;
use std::path::Path;
use chrono::{DateTime, Utc};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use utils_common::{PageType, SourcePost};

/// 不含正文的系统页面，按站点内的相对路径匹配
const SYSTEM_PATHS: [&str; 2] = ["/404.html", "/search/"];

/// 提取正文时跳过的标签
const NON_CONTENT_TAGS: [&str; 20] = [
    "script", "style", "head", "meta", "link",
    "header", "footer", "nav", "aside",
    "noscript", "iframe", "svg", "path",
    "button", "input", "form", "select", "option", "textarea", "template",
];

/// 从已渲染的HTML文件中提取文章
///
/// 只有 og:type 为 article 的页面会被返回，其余页面返回 `Ok(None)`。
pub fn extract_post_from_file(file_path: &Path, base_dir: &Path) -> Result<Option<SourcePost>, String> {
    let relative_path = file_path.strip_prefix(base_dir)
        .map_err(|_| format!("计算相对路径失败: {}", file_path.display()))?;

    // 站点目录本身的上级路径不参与匹配
    let site_path = format!("/{}", relative_path.to_string_lossy().replace('\\', "/").to_lowercase());
    if SYSTEM_PATHS.iter().any(|system| site_path.contains(system)) {
        return Ok(None);
    }

    let html = fs::read_to_string(file_path)
        .map_err(|e| format!("无法读取文件 {}: {}", file_path.display(), e))?;

    extract_post(&html, &post_id(relative_path))
}

/// 由相对路径计算文章ID: `posts/hello/index.html` -> `posts/hello`
pub fn post_id(relative_path: &Path) -> String {
    let without_ext = relative_path.with_extension("");
    let path = match without_ext.file_name() {
        Some(name) if name == "index" => without_ext.parent().map(Path::to_path_buf).unwrap_or_default(),
        _ => without_ext,
    };

    path.to_string_lossy().replace('\\', "/").trim_matches('/').to_string()
}

/// 从HTML文本中提取文章
pub fn extract_post(html: &str, id: &str) -> Result<Option<SourcePost>, String> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| format!("解析HTML时出错: {}", e))?;

    let meta_tags = extract_meta_tags(&dom.document);

    // og:type 决定页面类型，只处理博客文章
    let page_type = meta_tags.get("og:type")
        .map(|value| PageType::from_og_type(value))
        .unwrap_or_default();
    if page_type != PageType::Article {
        return Ok(None);
    }

    let title = extract_title(&dom.document);
    if title.is_empty() || id.is_empty() {
        return Ok(None);
    }

    // 缺失或无法解析的发布时间保持为空，列表页会把这类文章排除在外
    let published = meta_tags.get("article:published_time")
        .and_then(|value| DateTime::parse_from_rfc3339(value.trim()).ok())
        .map(|date| date.with_timezone(&Utc));

    let image = meta_tags.get("og:image")
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty());

    Ok(Some(SourcePost {
        id: id.to_string(),
        title,
        content: extract_content(&dom.document),
        published,
        slug: format!("/{}/", id),
        image,
        page_type,
    }))
}

/// 深度优先查找第一个指定标签的元素
fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }

    handle.children.borrow().iter().find_map(|child| find_element(child, tag))
}

/// 标题: 优先 <title>，其次 <h1>
fn extract_title(handle: &Handle) -> String {
    ["title", "h1"]
        .iter()
        .filter_map(|tag| find_element(handle, tag))
        .map(|element| {
            let mut text = String::new();
            extract_text(&element, &mut text);
            collapse_whitespace(&text)
        })
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// 收集所有 meta 标签，键为 name 或 property
fn extract_meta_tags(handle: &Handle) -> HashMap<String, String> {
    let mut meta_tags = HashMap::new();
    collect_meta_tags(handle, &mut meta_tags);
    meta_tags
}

fn collect_meta_tags(handle: &Handle, meta_tags: &mut HashMap<String, String>) {
    if let NodeData::Element { ref name, ref attrs, .. } = handle.data {
        if &*name.local == "meta" {
            let attrs = attrs.borrow();
            let attr = |key: &str| {
                attrs.iter()
                    .find(|attr| &*attr.name.local == key)
                    .map(|attr| attr.value.to_string())
            };

            if let (Some(key), Some(content)) = (attr("name").or_else(|| attr("property")), attr("content")) {
                meta_tags.insert(key, content);
            }
        }
    }

    for child in handle.children.borrow().iter() {
        collect_meta_tags(child, meta_tags);
    }
}

/// 正文: 依次尝试 <article>、<main>、<body>
fn extract_content(handle: &Handle) -> String {
    let mut content = String::new();

    if let Some(root) = ["article", "main", "body"].iter().find_map(|tag| find_element(handle, tag)) {
        extract_content_text(&root, &mut content);
    }

    collapse_whitespace(&content)
}

fn extract_content_text(handle: &Handle, text: &mut String) {
    match handle.data {
        NodeData::Element { ref name, ref attrs, .. } => {
            let tag: &str = &name.local;
            if NON_CONTENT_TAGS.contains(&tag) {
                return;
            }

            // 跳过导航、目录、分享等区域
            let skipped = attrs.borrow().iter().any(|attr| {
                let key: &str = &attr.name.local;
                if key != "class" && key != "id" {
                    return false;
                }
                let value = attr.value.to_lowercase();
                ["sr-only", "nav", "menu", "sidebar", "comment", "related", "share", "toc"]
                    .iter()
                    .any(|marker| value.contains(marker))
            });
            if skipped {
                return;
            }

            for child in handle.children.borrow().iter() {
                extract_content_text(child, text);
            }
        }
        NodeData::Text { ref contents } => {
            text.push_str(&contents.borrow());
            text.push(' ');
        }
        _ => {
            for child in handle.children.borrow().iter() {
                extract_content_text(child, text);
            }
        }
    }
}

fn extract_text(handle: &Handle, text: &mut String) {
    if let NodeData::Text { ref contents } = handle.data {
        text.push_str(&contents.borrow());
        text.push(' ');
    }

    for child in handle.children.borrow().iter() {
        extract_text(child, text);
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
