use thiserror::Error;

/// 序列化相关错误
#[derive(Error, Debug)]
pub enum SerializerError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
    /// 目标格式无法表示某个值
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
}

/// 核心序列化 trait
///
/// F: 源类型（From type）
/// T: 目标类型（To type）
pub trait Serializer<F: ?Sized, T>: Send + Sync {
    /// 序列化：将 F 类型转换为 T 类型
    fn serialize(&self, from: &F) -> Result<T, SerializerError>;
}
