//! 标记语言（XML）节点模型
//!
//! XmlParser 产出、XmlSerializer 消费的通用树结构。

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// XML 元素
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML 内容节点
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// 直接子元素（按文档顺序）
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
    }

    /// 直接文本内容，不含后代元素的文本
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Content::Text(t) => Some(t.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }

    /// 是否为叶子节点（没有子元素）
    pub fn is_leaf(&self) -> bool {
        self.elements().next().is_none()
    }

    /// 转换为通用结构表示
    ///
    /// - 属性放在 `@attributes` 对象中
    /// - 子元素按名称分组，出现一次为单值，多次为数组
    /// - 无属性的纯文本子元素表示为字符串，空元素表示为 `{}`
    /// - 没有子元素但带属性的元素，其文本放在 `"0"` 下
    pub fn to_json_value(&self) -> JsonValue {
        let mut obj = JsonMap::new();

        if !self.attributes.is_empty() {
            let attrs = self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
                .collect();
            obj.insert("@attributes".to_string(), JsonValue::Object(attrs));
        }

        if self.is_leaf() {
            let text = self.text();
            if !text.trim().is_empty() {
                obj.insert("0".to_string(), JsonValue::String(text));
            }
            return JsonValue::Object(obj);
        }

        let mut groups: IndexMap<&str, Vec<JsonValue>> = IndexMap::new();
        for child in self.elements() {
            groups.entry(child.name.as_str()).or_default().push(child.child_json_value());
        }
        for (name, mut values) in groups {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                JsonValue::Array(values)
            };
            obj.insert(name.to_string(), value);
        }

        JsonValue::Object(obj)
    }

    fn child_json_value(&self) -> JsonValue {
        if self.attributes.is_empty() && self.is_leaf() {
            let text = self.text();
            if !text.trim().is_empty() {
                return JsonValue::String(text);
            }
        }
        self.to_json_value()
    }
}

/// 文本规范化：去掉首尾空白，内部连续空白折叠为一个空格
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
