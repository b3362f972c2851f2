use thiserror::Error;

/// 解析相关错误
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Parse failed: {0}")]
    ParseFailed(String),
}

/// 外部格式解析器 trait
///
/// T: 解析结果类型
pub trait Parser<T>: Send + Sync {
    /// 解析完整的文件内容
    ///
    /// # 参数
    /// - buf: 待解析的字节数据
    ///
    /// # 返回
    /// - Ok(T): 解析结果
    /// - Err(ParserError): 解析失败
    fn parse(&self, buf: &[u8]) -> Result<T, ParserError>;
}
