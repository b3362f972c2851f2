use std::fmt;
use std::str::FromStr;

use super::error::KvError;
use super::value::Items;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpFormat {
    /// 有序键值映射
    #[default]
    Array,
    Json,
    Ini,
    Xml,
}

impl FromStr for DumpFormat {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "array" => Ok(DumpFormat::Array),
            "json" => Ok(DumpFormat::Json),
            "ini" => Ok(DumpFormat::Ini),
            "xml" => Ok(DumpFormat::Xml),
            _ => Err(KvError::FormatNotSupported(s.to_string())),
        }
    }
}

impl fmt::Display for DumpFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpFormat::Array => write!(f, "array"),
            DumpFormat::Json => write!(f, "json"),
            DumpFormat::Ini => write!(f, "ini"),
            DumpFormat::Xml => write!(f, "xml"),
        }
    }
}

/// 导出结果
#[derive(Debug, Clone, PartialEq)]
pub enum Dump {
    /// `array` 格式：键值映射快照
    Array(Items),
    /// `json`、`ini`、`xml` 格式：序列化后的文本
    Text(String),
}

impl Dump {
    pub fn as_array(&self) -> Option<&Items> {
        match self {
            Dump::Array(items) => Some(items),
            Dump::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Dump::Text(text) => Some(text),
            Dump::Array(_) => None,
        }
    }

    pub fn into_array(self) -> Option<Items> {
        match self {
            Dump::Array(items) => Some(items),
            Dump::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Dump::Text(text) => Some(text),
            Dump::Array(_) => None,
        }
    }
}
