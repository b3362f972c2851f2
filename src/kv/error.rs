use thiserror::Error;

use super::parser::ParserError;
use super::serializer::SerializerError;

/// 容器相关错误类型
#[derive(Error, Debug)]
pub enum KvError {
    /// 键类型不合法，或者输出格式不支持某个值的类型
    #[error("Wrong type: {0}")]
    WrongType(String),
    /// 导入文件时，解析出的文件格式没有对应的处理器
    #[error("Filetype not supported: {0}")]
    FiletypeNotSupported(String),
    /// 导出时，格式名称无法识别
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),
    /// 导入源既不是键值对、映射、XML 节点，也不是一个存在的文件
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),
    #[error(transparent)]
    Parse(#[from] ParserError),
    #[error(transparent)]
    Serialize(SerializerError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<SerializerError> for KvError {
    fn from(e: SerializerError) -> Self {
        match e {
            SerializerError::UnsupportedValue(msg) => KvError::WrongType(msg),
            other => KvError::Serialize(other),
        }
    }
}

pub type Result<T, E = KvError> = std::result::Result<T, E>;
