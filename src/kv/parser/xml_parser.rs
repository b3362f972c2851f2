use garde::Validate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use super::{Parser, ParserError};
use crate::kv::markup::{Content, Element};

/// XmlParser 配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, SmartDefault, Validate)]
#[serde(default)]
pub struct XmlParserConfig {
    /// 是否保留纯空白的文本节点（默认：否，缩进产生的空白会被丢弃）
    #[default = false]
    #[garde(skip)]
    pub keep_whitespace: bool,
}

/// XML 文件解析器
///
/// 把整个文档解析为一棵 [`Element`] 树，返回根元素。
/// 注释、处理指令和文档类型声明会被忽略，CDATA 合并到相邻文本中。
pub struct XmlParser {
    keep_whitespace: bool,
}

impl XmlParser {
    pub fn new(config: XmlParserConfig) -> Self {
        Self {
            keep_whitespace: config.keep_whitespace,
        }
    }

    fn push_text(&self, stack: &mut [Element], text: &str) -> Result<(), ParserError> {
        let Some(parent) = stack.last_mut() else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(ParserError::ParseFailed(
                "text outside of root element".to_string(),
            ));
        };

        if !self.keep_whitespace && text.trim().is_empty() {
            return Ok(());
        }

        match parent.children.last_mut() {
            Some(Content::Text(prev)) => prev.push_str(text),
            _ => parent.children.push(Content::Text(text.to_string())),
        }
        Ok(())
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new(XmlParserConfig::default())
    }
}

impl From<XmlParserConfig> for XmlParser {
    fn from(config: XmlParserConfig) -> Self {
        Self::new(config)
    }
}

fn parse_failed(e: impl std::fmt::Display) -> ParserError {
    ParserError::ParseFailed(e.to_string())
}

fn start_element(start: &BytesStart) -> Result<Element, ParserError> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref()).map_err(parse_failed)?;
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(parse_failed)?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(parse_failed)?;
        let value = attr.unescape_value().map_err(parse_failed)?;
        element.attributes.insert(key.to_string(), value.into_owned());
    }
    Ok(element)
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParserError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Content::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(ParserError::ParseFailed(format!(
            "multiple root elements, found <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

impl Parser<Element> for XmlParser {
    fn parse(&self, buf: &[u8]) -> Result<Element, ParserError> {
        let content = std::str::from_utf8(buf)
            .map_err(|e| ParserError::ParseFailed(format!("invalid UTF-8: {}", e)))?;

        let mut reader = Reader::from_str(content);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(start_element(&e)?),
                Ok(Event::Empty(e)) => {
                    let element = start_element(&e)?;
                    close_element(element, &mut stack, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| parse_failed("unexpected closing tag"))?;
                    close_element(element, &mut stack, &mut root)?;
                }
                Ok(Event::Text(t)) => {
                    let text = t.unescape().map_err(parse_failed)?;
                    self.push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(c)) => {
                    let inner = c.into_inner();
                    let text = std::str::from_utf8(&inner).map_err(parse_failed)?;
                    self.push_text(&mut stack, text)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ParserError::ParseFailed(format!(
                        "error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(ParserError::ParseFailed(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        root.ok_or_else(|| parse_failed("no root element"))
    }
}
