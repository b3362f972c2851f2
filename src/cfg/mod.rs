//! cfg 模块 - 配置管理
//!
//! 容器及其解析器、序列化器的配置，支持 JSON5 / YAML / TOML 格式

pub mod container_config;

// 重新导出公共 API
pub use container_config::ContainerConfig;
