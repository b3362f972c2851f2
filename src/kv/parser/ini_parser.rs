use garde::Validate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use super::{Parser, ParserError};

/// IniParser 配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, SmartDefault, Validate)]
#[serde(default)]
pub struct IniParserConfig {
    /// 是否去掉包裹整个值的引号（默认：是）
    #[default = true]
    #[garde(skip)]
    pub strip_quotes: bool,
}

/// ini 文件解析器
///
/// 以原始模式解析：所有值都保留为字符串，不做类型转换；
/// 节（`[section]`）只作为分隔，所有键合并到同一个扁平映射中。
/// 重复的键以后出现的为准，但保持第一次出现的位置。
///
/// # 示例
/// ```
/// use kvstore::kv::parser::{IniParser, IniParserConfig, Parser};
///
/// let parser = IniParser::new(IniParserConfig::default());
/// let map = parser.parse(b"; comment\nasp_tags = Off\nname=\"John\"\n").unwrap();
/// assert_eq!(map["asp_tags"], "Off");
/// assert_eq!(map["name"], "John");
/// ```
pub struct IniParser {
    strip_quotes: bool,
}

impl IniParser {
    pub fn new(config: IniParserConfig) -> Self {
        Self {
            strip_quotes: config.strip_quotes,
        }
    }

    /// 提取值：引号包裹的值原样保留内容，未加引号的值在第一个 `;` 处截断
    fn value_of<'a>(&self, raw: &'a str) -> &'a str {
        let value = raw.trim();
        for quote in ['"', '\''] {
            let Some(inner) = value.strip_prefix(quote) else {
                continue;
            };
            let Some(end) = inner.find(quote) else {
                break;
            };
            let rest = inner[end + 1..].trim_start();
            if rest.is_empty() || rest.starts_with(';') {
                return if self.strip_quotes {
                    &inner[..end]
                } else {
                    &value[..end + 2]
                };
            }
            break;
        }
        match value.find(';') {
            Some(pos) => value[..pos].trim_end(),
            None => value,
        }
    }
}

impl Default for IniParser {
    fn default() -> Self {
        Self::new(IniParserConfig::default())
    }
}

impl From<IniParserConfig> for IniParser {
    fn from(config: IniParserConfig) -> Self {
        Self::new(config)
    }
}

impl Parser<IndexMap<String, String>> for IniParser {
    fn parse(&self, buf: &[u8]) -> Result<IndexMap<String, String>, ParserError> {
        let content = std::str::from_utf8(buf)
            .map_err(|e| ParserError::ParseFailed(format!("invalid UTF-8: {}", e)))?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut map = IndexMap::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                ParserError::ParseFailed(format!("line {}: expected key=value, got '{}'", idx + 1, line))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ParserError::ParseFailed(format!("line {}: empty key", idx + 1)));
            }

            map.insert(key.to_string(), self.value_of(value).to_string());
        }

        Ok(map)
    }
}
