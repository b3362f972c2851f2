use garde::Validate;
use serde::{Deserialize, Serialize};

use super::core::{Serializer, SerializerError};
use crate::kv::value::Items;

/// JSON 序列化器配置
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Validate)]
pub struct JsonSerializerConfig {
    /// 是否格式化输出（美化 JSON）
    #[serde(default)]
    #[garde(skip)]
    pub pretty: bool,
}

/// JSON 序列化器
///
/// 输出一个 JSON 对象，键一律写成字符串，XML 节点按属性/子元素结构展开
pub struct JsonSerializer {
    config: JsonSerializerConfig,
}

impl JsonSerializer {
    pub fn new(config: JsonSerializerConfig) -> Self {
        Self { config }
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new(JsonSerializerConfig::default())
    }
}

impl From<JsonSerializerConfig> for JsonSerializer {
    fn from(config: JsonSerializerConfig) -> Self {
        JsonSerializer::new(config)
    }
}

impl Serializer<Items, String> for JsonSerializer {
    fn serialize(&self, from: &Items) -> Result<String, SerializerError> {
        if self.config.pretty {
            serde_json::to_string_pretty(from)
                .map_err(|e| SerializerError::SerializationFailed(e.to_string()))
        } else {
            serde_json::to_string(from)
                .map_err(|e| SerializerError::SerializationFailed(e.to_string()))
        }
    }
}
