pub mod core;
pub mod ini_serializer;
pub mod json_serializer;
pub mod xml_serializer;

// 重新导出核心类型和 trait
pub use core::{Serializer, SerializerError};

// 重新导出具体的序列化器
pub use ini_serializer::{IniSerializer, IniSerializerConfig};
pub use json_serializer::{JsonSerializer, JsonSerializerConfig};
pub use xml_serializer::{XmlSerializer, XmlSerializerConfig};
