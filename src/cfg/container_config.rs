use anyhow::Result;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::kv::parser::{IniParserConfig, XmlParserConfig};
use crate::kv::serializer::{IniSerializerConfig, JsonSerializerConfig, XmlSerializerConfig};

/// 容器配置
///
/// 汇总各个解析器和序列化器的配置，缺省字段使用默认值
///
/// # 示例
/// ```
/// use kvstore::cfg::ContainerConfig;
///
/// let config = ContainerConfig::from_json(r#"{
///     // 支持注释和未加引号的键
///     xml: { root: "config", indent: 4 },
///     json: { pretty: true },
/// }"#).unwrap();
///
/// assert_eq!(config.xml.root, "config");
/// assert!(config.json.pretty);
/// assert!(config.ini_parser.strip_quotes);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ContainerConfig {
    /// XML 文件解析器配置
    #[garde(dive)]
    pub xml_parser: XmlParserConfig,
    /// ini 文件解析器配置
    #[garde(dive)]
    pub ini_parser: IniParserConfig,
    /// `json` 导出配置
    #[garde(dive)]
    pub json: JsonSerializerConfig,
    /// `ini` 导出配置
    #[garde(dive)]
    pub ini: IniSerializerConfig,
    /// `xml` 导出配置
    #[garde(dive)]
    pub xml: XmlSerializerConfig,
}

impl ContainerConfig {
    /// 从 JSON 字符串创建配置（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Self::validated(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建配置
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Self::validated(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建配置
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Self::validated(toml::from_str(toml_str)?)
    }

    fn validated(config: Self) -> Result<Self> {
        if let Err(errors) = config.validate() {
            return Err(anyhow::anyhow!(
                "configuration validation failed: {}",
                errors
            ));
        }
        Ok(config)
    }

    /// 导出为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 导出为 YAML 字符串
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// 导出为 TOML 字符串
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
