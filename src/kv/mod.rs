//! KV 容器模块
//!
//! 有序键值容器，以及它导入/导出所依赖的解析器和序列化器

pub mod container;
pub mod dump;
pub mod entry;
pub mod error;
pub mod key;
pub mod markup;
pub mod parser;
pub mod serializer;
pub mod source;
pub mod value;

// 重新导出核心接口
pub use container::Container;
pub use dump::{Dump, DumpFormat};
pub use entry::Entry;
pub use error::{KvError, Result};
pub use key::Key;
pub use markup::{Content, Element};
pub use parser::{Parser, ParserError};
pub use serializer::{Serializer, SerializerError};
pub use source::{FileFormat, Source};
pub use value::{Items, Value};
