use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use super::core::{Serializer, SerializerError};
use crate::kv::value::Items;

/// ini 序列化器配置
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, SmartDefault, Validate)]
#[serde(default)]
pub struct IniSerializerConfig {
    /// 行尾符：`\n`（默认）、`\r\n` 或 `\r`
    #[default = "\n"]
    #[garde(pattern("^(\r\n|\n|\r)$"))]
    pub line_ending: String,
}

/// ini 序列化器
///
/// 每个键值对输出一行 `key=value`，按插入顺序排列。只支持标量值。
pub struct IniSerializer {
    line_ending: String,
}

impl IniSerializer {
    pub fn new(config: IniSerializerConfig) -> Self {
        Self {
            line_ending: config.line_ending,
        }
    }
}

impl Default for IniSerializer {
    fn default() -> Self {
        Self::new(IniSerializerConfig::default())
    }
}

impl From<IniSerializerConfig> for IniSerializer {
    fn from(config: IniSerializerConfig) -> Self {
        IniSerializer::new(config)
    }
}

impl Serializer<Items, String> for IniSerializer {
    fn serialize(&self, from: &Items) -> Result<String, SerializerError> {
        let mut out = String::new();
        for (key, value) in from {
            let text = value.scalar_text().ok_or_else(|| {
                SerializerError::UnsupportedValue(format!(
                    "cannot export {} value of key '{}' to ini",
                    value.type_name(),
                    key
                ))
            })?;
            out.push_str(&format!("{}={}", key, text));
            out.push_str(&self.line_ending);
        }
        Ok(out)
    }
}
