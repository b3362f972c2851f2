pub mod core;
pub mod ini_parser;
pub mod xml_parser;

// 重新导出核心类型和 trait
pub use core::{Parser, ParserError};

// 重新导出具体的解析器
pub use ini_parser::{IniParser, IniParserConfig};
pub use xml_parser::{XmlParser, XmlParserConfig};
