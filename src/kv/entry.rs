use super::error::{KvError, Result};
use super::key::{float_to_int, Key};
use super::value::Value;

/// 单个经过类型校验的键值对
///
/// 构造后不可修改。容器导入时只提取其中的键和值，不保存 Entry 本身。
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: Key,
    value: Value,
}

impl Entry {
    /// 创建键值对，键必须是数字或字符串。
    /// 浮点数键必须是有限值且截断后落在 i64 范围内。
    ///
    /// # 示例
    /// ```
    /// use kvstore::{Entry, KvError, Value};
    ///
    /// let entry = Entry::new(42, "answer").unwrap();
    /// assert_eq!(entry.value(), &Value::from("answer"));
    ///
    /// let err = Entry::new(Value::Null, 1).unwrap_err();
    /// assert!(matches!(err, KvError::WrongType(_)));
    /// ```
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Result<Self> {
        let key = match key.into() {
            Value::Int(i) => Key::Int(i),
            Value::Float(f) if float_to_int(f).is_some() => Key::Float(f),
            Value::Float(f) => {
                return Err(KvError::WrongType(format!(
                    "float key {} is not representable as an integer",
                    f
                )))
            }
            Value::Text(s) => Key::Text(s),
            _ => return Err(KvError::WrongType("key must be number or string".to_string())),
        };
        Ok(Self {
            key,
            value: value.into(),
        })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (Key, Value) {
        (self.key, self.value)
    }
}

impl From<(Key, Value)> for Entry {
    fn from((key, value): (Key, Value)) -> Self {
        Self { key, value }
    }
}
