use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::entry::Entry;
use super::error::KvError;
use super::markup::Element;
use super::value::Value;

/// 可导入的文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xml,
    Ini,
}

impl FileFormat {
    /// 根据扩展名（不区分大小写）推断文件格式
    pub fn from_path(path: &Path) -> Result<Self, KvError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for FileFormat {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(FileFormat::Xml),
            "ini" => Ok(FileFormat::Ini),
            _ => Err(KvError::FiletypeNotSupported(s.to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Xml => write!(f, "xml"),
            FileFormat::Ini => write!(f, "ini"),
        }
    }
}

/// 导入源
///
/// `Container::push` 按变体分派：
/// - `Entry`: 单个键值对
/// - `Mapping`: 有序的键值对列表，逐个校验键的类型
/// - `Markup`: XML 节点，导入它的直接子元素
/// - `File`: 文件路径，格式为空时按扩展名推断
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Entry(Entry),
    Mapping(Vec<(Value, Value)>),
    Markup(Element),
    File {
        path: PathBuf,
        format: Option<String>,
    },
}

impl Source {
    /// 文件源，格式由扩展名决定
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File {
            path: path.into(),
            format: None,
        }
    }

    /// 文件源，显式指定格式（优先于扩展名）
    pub fn file_as(path: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Source::File {
            path: path.into(),
            format: Some(format.into()),
        }
    }

    /// 映射源
    pub fn mapping<K, V, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Source::Mapping(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// 变体名称，用于日志
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Entry(_) => "entry",
            Source::Mapping(_) => "mapping",
            Source::Markup(_) => "markup",
            Source::File { .. } => "file",
        }
    }
}

impl From<Entry> for Source {
    fn from(entry: Entry) -> Self {
        Source::Entry(entry)
    }
}

impl From<Element> for Source {
    fn from(element: Element) -> Self {
        Source::Markup(element)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::file(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::file(path)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<Vec<(K, V)>> for Source {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Source::mapping(pairs)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<IndexMap<K, V>> for Source {
    fn from(map: IndexMap<K, V>) -> Self {
        Source::mapping(map)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Source {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Source::mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))))
    }
}
