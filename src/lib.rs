//! kvstore - 有序键值容器
//!
//! 可以从多种外部格式导入数据，也可以导出为多种格式的内存容器。
//!
//! ## 模块
//!
//! - **cfg**: 容器配置（支持 JSON5 / YAML / TOML）
//! - **kv**: 键值对、容器，以及 xml/ini 解析器和 json/ini/xml 序列化器
//!
//! ## 快速开始
//!
//! ```rust
//! use kvstore::{Container, DumpFormat, Entry, FileFormat, Value};
//!
//! let mut container = Container::new();
//! container.push(Entry::new("firstName", "John")?)?;
//! container.push_str("lastName = Sellick\n", FileFormat::Ini)?;
//! container.set("age", 42)?;
//!
//! assert_eq!(container.get("age"), Some(&Value::Int(42)));
//! assert_eq!(
//!     container.to_ini()?,
//!     "firstName=John\nlastName=Sellick\nage=42\n"
//! );
//! assert_eq!(
//!     container.dump(DumpFormat::Json)?.into_text().unwrap(),
//!     r#"{"firstName":"John","lastName":"Sellick","age":42}"#
//! );
//! # Ok::<(), kvstore::KvError>(())
//! ```

pub mod cfg;
pub mod kv;

// 重新导出主要的公共 API
pub use cfg::ContainerConfig;

pub use kv::{
    Container, Content, Dump, DumpFormat, Element, Entry, FileFormat, Items, Key, KvError,
    Source, Value,
};
