use wasm_bindgen::prelude::*;
use once_cell::sync::OnceCell;
use web_sys::console;

// 导出模块
pub mod builder;
pub mod error;
pub mod filter;
pub mod models;
pub mod page;
pub mod pagination;
pub mod view;

pub use error::BlogListError;
pub use filter::{FilterControl, FilterSelection};
pub use models::{BlogConfig, ImageRef, PageBundle, PageContext, PostRecord};
pub use page::{derive_view, BlogIndexPage};
pub use pagination::PaginationProps;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// 全局配置，只能设置一次
static CONFIG: OnceCell<BlogConfig> = OnceCell::new();

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 当前生效的配置，未设置时使用默认值
pub fn current_config() -> BlogConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

/// 设置全局配置
pub fn set_config(config: BlogConfig) -> Result<(), BlogListError> {
    CONFIG.set(config).map_err(|_| BlogListError::AlreadyConfigured)
}

fn to_js_error(err: BlogListError) -> JsValue {
    let message = err.to_string();
    console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn selection_to_js(selection: FilterSelection) -> JsValue {
    selection.value().map(JsValue::from_str).unwrap_or(JsValue::NULL)
}

/// 博客列表页JS接口 - 宿主负责绘制DOM，这里负责状态和派生数据
#[wasm_bindgen]
pub struct BlogIndexJS {
    page: BlogIndexPage,
    on_change: Option<js_sys::Function>,
}

impl BlogIndexJS {
    fn with_bundle(bundle: PageBundle) -> BlogIndexJS {
        console::log_1(&JsValue::from_str(&format!(
            "加载博客列表第 {} 页，文章数: {}",
            bundle.page_context.current_page(),
            bundle.posts.len()
        )));

        BlogIndexJS {
            page: BlogIndexPage::new(bundle, current_config()),
            on_change: None,
        }
    }
}

#[wasm_bindgen]
impl BlogIndexJS {
    /// 设置博客配置（JSON），整个页面生命周期内只能调用一次
    #[wasm_bindgen]
    pub fn configure(config_json: &str) -> Result<(), JsValue> {
        let config = BlogConfig::from_json(config_json).map_err(to_js_error)?;
        set_config(config).map_err(to_js_error)
    }

    /// 从压缩的页面数据包创建
    #[wasm_bindgen]
    pub fn from_bundle(bundle_data: &[u8]) -> Result<BlogIndexJS, JsValue> {
        let bundle = PageBundle::from_compressed(bundle_data).map_err(to_js_error)?;
        Ok(Self::with_bundle(bundle))
    }

    /// 从 JSON 创建，格式为 `{ posts, pageContext }`
    #[wasm_bindgen]
    pub fn from_json(data_json: &str) -> Result<BlogIndexJS, JsValue> {
        let bundle = PageBundle::from_json(data_json).map_err(to_js_error)?;
        Ok(Self::with_bundle(bundle))
    }

    /// 注册筛选变化回调，回调参数为 null / "2023" / "2022"
    #[wasm_bindgen]
    pub fn on_filter_change(&mut self, callback: js_sys::Function) {
        self.on_change = Some(callback);
    }

    /// 用户点击筛选按钮，返回新的视图
    #[wasm_bindgen]
    pub fn select_filter(&mut self, value: Option<String>) -> Result<JsValue, JsValue> {
        let callback = &self.on_change;
        self.page
            .select_value(value.as_deref(), |selected| {
                if let Some(callback) = callback {
                    if let Err(e) = callback.call1(&JsValue::NULL, &selection_to_js(selected)) {
                        console::warn_1(&e);
                    }
                }
            })
            .map_err(to_js_error)?;

        self.render()
    }

    /// 当前视图
    #[wasm_bindgen]
    pub fn render(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.page.render())
            .map_err(|e| JsValue::from_str(&format!("序列化视图失败: {}", e)))
    }

    /// 当前可见文章数
    #[wasm_bindgen]
    pub fn visible_count(&self) -> usize {
        self.page.visible_posts().len()
    }

    /// 当前筛选值
    #[wasm_bindgen]
    pub fn active_filter(&self) -> JsValue {
        selection_to_js(self.page.filter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_can_only_be_set_once() {
        let config = BlogConfig {
            blog_slug: "/notes/".to_string(),
            ..BlogConfig::default()
        };

        assert!(set_config(config.clone()).is_ok());
        assert_eq!(current_config(), config);
        assert!(matches!(
            set_config(BlogConfig::default()),
            Err(BlogListError::AlreadyConfigured)
        ));
    }
}
