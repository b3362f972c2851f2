use garde::Validate;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::io::Write;

use super::core::{Serializer, SerializerError};
use crate::kv::markup::{Content, Element};
use crate::kv::value::{Items, Value};

/// XML 序列化器配置
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, SmartDefault, Validate)]
#[serde(default)]
pub struct XmlSerializerConfig {
    /// 根元素名称（默认：root），限 ASCII 字母、数字和 `_:.-`，不能以数字开头
    #[default = "root"]
    #[garde(pattern(r"^[A-Za-z_:][A-Za-z0-9_:.\-]*$"))]
    pub root: String,

    /// 缩进空格数（默认：2，0 - 16）
    #[default = 2]
    #[garde(range(max = 16))]
    pub indent: usize,
}

/// XML 序列化器
///
/// 生成以 `root` 为根的文档：XML 节点值原样作为子树导入，
/// 标量值生成以键命名的叶子元素，其他值报错。
///
/// # 示例
/// ```
/// use kvstore::kv::serializer::{Serializer, XmlSerializer};
/// use kvstore::{Items, Key, Value};
///
/// let mut items = Items::new();
/// items.insert(Key::from("name"), Value::from("John"));
///
/// let xml = XmlSerializer::default().serialize(&items).unwrap();
/// assert_eq!(xml, "<?xml version=\"1.0\"?>\n<root>\n  <name>John</name>\n</root>\n");
/// ```
pub struct XmlSerializer {
    root: String,
    indent: usize,
}

impl XmlSerializer {
    pub fn new(config: XmlSerializerConfig) -> Self {
        Self {
            root: config.root,
            indent: config.indent,
        }
    }
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self::new(XmlSerializerConfig::default())
    }
}

impl From<XmlSerializerConfig> for XmlSerializer {
    fn from(config: XmlSerializerConfig) -> Self {
        XmlSerializer::new(config)
    }
}

fn write_failed(e: impl std::fmt::Display) -> SerializerError {
    SerializerError::SerializationFailed(e.to_string())
}

/// 判断是否为合法的 XML 元素名
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

fn write_leaf<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), SerializerError> {
    if text.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(write_failed)?;
        return Ok(());
    }
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_failed)?;
    writer
        .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
        .map_err(write_failed)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_failed)?;
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), SerializerError> {
    if !is_valid_name(&element.name) {
        return Err(SerializerError::UnsupportedValue(format!(
            "node '{}' is not a valid element name",
            element.name
        )));
    }
    let mut start = BytesStart::new(element.name.as_str());
    for (k, v) in &element.attributes {
        if !is_valid_name(k) {
            return Err(SerializerError::UnsupportedValue(format!(
                "attribute '{}' of <{}> is not a valid name",
                k, element.name
            )));
        }
        start.push_attribute((k.as_str(), v.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(write_failed)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(write_failed)?;
    for child in &element.children {
        match child {
            Content::Element(e) => write_element(writer, e)?,
            Content::Text(t) => writer
                .write_event(Event::Text(BytesText::from_escaped(partial_escape(t))))
                .map_err(write_failed)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_failed)?;
    Ok(())
}

impl Serializer<Items, String> for XmlSerializer {
    fn serialize(&self, from: &Items) -> Result<String, SerializerError> {
        if !is_valid_name(&self.root) {
            return Err(SerializerError::SerializationFailed(format!(
                "invalid root element name '{}'",
                self.root
            )));
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(write_failed)?;

        if from.is_empty() {
            writer
                .write_event(Event::Empty(BytesStart::new(self.root.as_str())))
                .map_err(write_failed)?;
        } else {
            writer
                .write_event(Event::Start(BytesStart::new(self.root.as_str())))
                .map_err(write_failed)?;
            for (key, value) in from {
                if let Value::Node(element) = value {
                    write_element(&mut writer, element)?;
                    continue;
                }

                let text = value.scalar_text().ok_or_else(|| {
                    SerializerError::UnsupportedValue(format!(
                        "cannot export {} value of key '{}' to xml",
                        value.type_name(),
                        key
                    ))
                })?;
                let name = key.to_string();
                if !is_valid_name(&name) {
                    return Err(SerializerError::UnsupportedValue(format!(
                        "key '{}' is not a valid element name",
                        name
                    )));
                }
                write_leaf(&mut writer, &name, &text)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(self.root.as_str())))
                .map_err(write_failed)?;
        }

        let mut out = String::from_utf8(writer.into_inner()).map_err(write_failed)?;
        out.push('\n');
        Ok(out)
    }
}
