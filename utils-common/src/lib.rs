pub mod compression;
pub mod models;

// 重新导出常用模块和函数
pub use compression::{to_compressed, from_compressed_with_max_version, validate_compressed_data, ContainerHeader};
pub use models::{SourcePost, PageType};
