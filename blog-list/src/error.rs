use thiserror::Error;

/// 博客列表页的错误类型
#[derive(Debug, Error)]
pub enum BlogListError {
    /// 页码上下文不合法
    #[error("无效的页码上下文: 第 {current_page} 页 / 共 {num_pages} 页")]
    InvalidPageContext { current_page: u32, num_pages: u32 },

    /// 筛选值不在固定集合内
    #[error("未知的筛选值: {0}")]
    UnknownFilter(String),

    /// 页面数据包解析失败
    #[error("解析页面数据包失败: {0}")]
    Bundle(#[from] std::io::Error),

    /// JSON 解析失败
    #[error("解析JSON失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置只能设置一次
    #[error("配置已初始化，不能重复设置")]
    AlreadyConfigured,
}

pub type Result<T> = std::result::Result<T, BlogListError>;
