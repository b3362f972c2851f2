//! 有序键值容器
//!
//! 支持从键值对、映射、XML 节点以及 xml/ini 文件导入，
//! 并导出为 array/json/ini/xml 格式。

use std::ops::Index;
use std::path::Path;

use crate::cfg::ContainerConfig;

use super::dump::{Dump, DumpFormat};
use super::entry::Entry;
use super::error::{KvError, Result};
use super::key::Key;
use super::markup::{normalize_text, Content, Element};
use super::parser::{IniParser, Parser, XmlParser};
use super::serializer::{IniSerializer, JsonSerializer, Serializer, XmlSerializer};
use super::source::{FileFormat, Source};
use super::value::{Items, Value};

static NULL: Value = Value::Null;

/// 有序键值容器
///
/// - 保持插入顺序，键唯一；覆盖已有键时保留其原位置
/// - 导入是追加/覆盖语义，从不清空已有数据
/// - 导入失败时，已经写入的部分不会回滚
///
/// 容器不做同步，跨线程共享时需要调用方自行加锁。
///
/// # 示例
/// ```
/// use kvstore::{Container, Entry, Value};
///
/// let mut container = Container::new();
/// container.push(vec![("a", 1), ("b", 2)]).unwrap();
/// container.push(vec![("b", 3)]).unwrap();
/// container.push(Entry::new("c", "text").unwrap()).unwrap();
///
/// assert_eq!(container.len(), 3);
/// assert_eq!(container.get("b"), Some(&Value::Int(3)));
/// assert_eq!(container.get("missing"), None);
///
/// let keys: Vec<String> = container.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["a", "b", "c"]);
/// ```
pub struct Container {
    items: Items,
    xml_parser: XmlParser,
    ini_parser: IniParser,
    json: JsonSerializer,
    ini: IniSerializer,
    xml: XmlSerializer,
}

impl Container {
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            items: Items::new(),
            xml_parser: XmlParser::new(config.xml_parser),
            ini_parser: IniParser::new(config.ini_parser),
            json: JsonSerializer::new(config.json),
            ini: IniSerializer::new(config.ini),
            xml: XmlSerializer::new(config.xml),
        }
    }

    /// 导入数据
    ///
    /// 按 [`Source`] 的变体分派：
    /// - `Entry`: 写入单个键值对
    /// - `Mapping`: 逐个校验并写入，遇到非法键立即失败
    /// - `Markup`: 写入节点的直接子元素
    /// - `File`: 读取整个文件，按 xml 或 ini 解析后写入
    pub fn push(&mut self, source: impl Into<Source>) -> Result<()> {
        let source = source.into();
        tracing::debug!(kind = source.kind(), "pushing source");

        match source {
            Source::Entry(entry) => {
                let (key, value) = entry.into_parts();
                self.insert(key, value);
                Ok(())
            }
            Source::Mapping(pairs) => self.push_mapping(pairs),
            Source::Markup(root) => {
                self.push_markup(root);
                Ok(())
            }
            Source::File { path, format } => self.push_file(&path, format.as_deref()),
        }
    }

    /// 从内存中的 xml/ini 文本导入，行为与导入同格式的文件一致
    pub fn push_str(&mut self, content: &str, format: FileFormat) -> Result<()> {
        self.push_bytes(content.as_bytes(), format)
    }

    fn insert(&mut self, key: Key, value: Value) {
        // IndexMap::insert 对已存在的键只替换值，不改变位置
        self.items.insert(key.canonical(), value);
    }

    fn push_mapping<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut count = 0usize;
        for (key, value) in pairs {
            let entry = Entry::new(key, value).map_err(|e| {
                tracing::warn!(pushed = count, error = %e, "mapping rejected");
                e
            })?;
            let (key, value) = entry.into_parts();
            self.insert(key, value);
            count += 1;
        }
        tracing::debug!(count, "pushed mapping");
        Ok(())
    }

    fn push_markup(&mut self, root: Element) {
        let mut count = 0usize;
        for child in root.children {
            let Content::Element(child) = child else {
                continue;
            };
            let key = Key::from(child.name.as_str());
            if child.is_leaf() {
                let text = normalize_text(&child.text());
                if !text.is_empty() {
                    self.insert(key, Value::Text(text));
                    count += 1;
                    continue;
                }
            }
            self.insert(key, Value::Node(child));
            count += 1;
        }
        tracing::debug!(root = %root.name, count, "pushed markup");
    }

    fn push_file(&mut self, path: &Path, format: Option<&str>) -> Result<()> {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "source is not a readable file");
            return Err(KvError::UnsupportedSource(format!(
                "'{}' is not a readable file",
                path.display()
            )));
        }

        let format = match format {
            Some(name) => name.parse::<FileFormat>(),
            None => FileFormat::from_path(path),
        }
        .map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "file type rejected");
            e
        })?;

        let buf = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), %format, bytes = buf.len(), "loaded file");
        self.push_bytes(&buf, format)
    }

    fn push_bytes(&mut self, buf: &[u8], format: FileFormat) -> Result<()> {
        match format {
            FileFormat::Xml => {
                let root = self.xml_parser.parse(buf)?;
                self.push_markup(root);
                Ok(())
            }
            FileFormat::Ini => {
                let map = self.ini_parser.parse(buf)?;
                self.push_mapping(
                    map.into_iter()
                        .map(|(k, v)| (Value::Text(k), Value::Text(v))),
                )
            }
        }
    }

    /// 获取值，键不存在时返回 None（与保存的 `Value::Null` 区分）
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.items.get(&key.into().canonical())
    }

    /// 获取值，键不存在时返回 `Value::Null`
    pub fn get_or_null(&self, key: impl Into<Key>) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.items.contains_key(&key.into().canonical())
    }

    /// 按索引写入，与 `push(Entry::new(key, value)?)` 等价
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        self.push(Entry::new(key, value)?)
    }

    /// 删除键，返回被删除的值；键不存在时什么也不做
    ///
    /// 其余键的相对顺序保持不变
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.items.shift_remove(&key.into().canonical())
    }

    /// 按索引删除，与 [`Container::delete`] 等价
    pub fn unset(&mut self, key: impl Into<Key>) {
        self.delete(key);
    }

    /// 当前保存的键数量
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// 按插入顺序遍历键值对
    ///
    /// 每次调用都得到一个新的迭代器；迭代期间容器被借用，无法修改
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.items.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.items.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.items.values()
    }

    /// 内部键值映射的只读视图
    pub fn as_map(&self) -> &Items {
        &self.items
    }

    /// 导出为指定格式
    pub fn dump(&self, format: DumpFormat) -> Result<Dump> {
        tracing::debug!(%format, count = self.items.len(), "dumping container");
        let result = match format {
            DumpFormat::Array => Ok(Dump::Array(self.items.clone())),
            DumpFormat::Json => self.json.serialize(&self.items).map(Dump::Text),
            DumpFormat::Ini => self.ini.serialize(&self.items).map(Dump::Text),
            DumpFormat::Xml => self.xml.serialize(&self.items).map(Dump::Text),
        };
        result.map_err(|e| {
            tracing::warn!(%format, error = %e, "dump failed");
            KvError::from(e)
        })
    }

    /// 按格式名称导出（不区分大小写），未知名称返回 `FormatNotSupported`
    pub fn dump_as(&self, format: &str) -> Result<Dump> {
        let format = format.parse::<DumpFormat>().map_err(|e| {
            tracing::warn!(format, "dump format rejected");
            e
        })?;
        self.dump(format)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(self.json.serialize(&self.items)?)
    }

    pub fn to_ini(&self) -> Result<String> {
        Ok(self.ini.serialize(&self.items)?)
    }

    pub fn to_xml(&self) -> Result<String> {
        Ok(self.xml.serialize(&self.items)?)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ContainerConfig> for Container {
    fn from(config: ContainerConfig) -> Self {
        Container::with_config(config)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.items.iter()).finish()
    }
}

/// 索引读取，键不存在时得到 `Value::Null`
impl<K: Into<Key>> Index<K> for Container {
    type Output = Value;

    fn index(&self, key: K) -> &Value {
        self.get_or_null(key)
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Container {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Extend<Entry> for Container {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        for entry in iter {
            let (key, value) = entry.into_parts();
            self.insert(key, value);
        }
    }
}

impl FromIterator<Entry> for Container {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        let mut container = Container::new();
        container.extend(iter);
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(container: &Container) -> Vec<String> {
        container.keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_push_entry() {
        let mut container = Container::new();
        container.push(Entry::new("key", "value").unwrap()).unwrap();
        assert_eq!(container.get("key"), Some(&Value::from("value")));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut container = Container::new();
        container.push(vec![("a", 1), ("b", 2)]).unwrap();
        container.push(vec![("b", 3)]).unwrap();

        assert_eq!(container.len(), 2);
        assert_eq!(container.get("a"), Some(&Value::Int(1)));
        assert_eq!(container.get("b"), Some(&Value::Int(3)));
        assert_eq!(keys(&container), vec!["a", "b"]);
    }

    #[test]
    fn test_mapping_fails_on_first_invalid_key() {
        let mut container = Container::new();
        let result = container.push(Source::Mapping(vec![
            (Value::from("a"), Value::Int(1)),
            (Value::from("b"), Value::Int(2)),
            (Value::Null, Value::Int(3)),
            (Value::from("d"), Value::Int(4)),
        ]));

        assert!(matches!(result, Err(KvError::WrongType(_))));
        // 非事务：前两个已经写入
        assert_eq!(keys(&container), vec!["a", "b"]);
    }

    #[test]
    fn test_absent_is_distinct_from_null() {
        let mut container = Container::new();
        container.set("nothing", Value::Null).unwrap();

        assert_eq!(container.get("nothing"), Some(&Value::Null));
        assert_eq!(container.get("missing"), None);
        assert!(container.contains_key("nothing"));
        assert!(!container.contains_key("missing"));
        assert_eq!(container.get_or_null("missing"), &Value::Null);
        assert_eq!(container["missing"], Value::Null);
    }

    #[test]
    fn test_numeric_keys_are_canonical() {
        let mut container = Container::new();
        container.set(2, "value1").unwrap();
        assert_eq!(container.get("2"), Some(&Value::from("value1")));

        container.set("2", "value2").unwrap();
        container.set(2.9, "value3").unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(container[2], Value::from("value3"));
        assert_eq!(container.keys().next(), Some(&Key::Int(2)));
    }

    #[test]
    fn test_set_validates_key() {
        let mut container = Container::new();
        let result = container.set(vec![1], "x");
        assert!(matches!(result, Err(KvError::WrongType(_))));
        assert!(container.is_empty());
    }

    #[test]
    fn test_delete() {
        let mut container = Container::new();
        container.push(vec![("a", 1), ("b", 2), ("c", 3)]).unwrap();

        assert_eq!(container.delete("b"), Some(Value::Int(2)));
        assert_eq!(keys(&container), vec!["a", "c"]);

        assert_eq!(container.delete("missing"), None);
        container.unset("missing");
        assert_eq!(container.len(), 2);

        container.unset("a");
        assert_eq!(keys(&container), vec!["c"]);
    }

    #[test]
    fn test_push_markup() {
        let root = Element::new("person")
            .with_child(Element::new("firstName").with_text("  John \n "))
            .with_child(Element::new("blank").with_text("   "))
            .with_child(
                Element::new("Session").with_child(Element::new("id").with_text("abc")),
            );

        let mut container = Container::new();
        container.push(root.clone()).unwrap();

        assert_eq!(container.get("firstName"), Some(&Value::from("John")));
        assert_eq!(
            container.get("blank"),
            Some(&Value::Node(Element::new("blank").with_text("   ")))
        );
        let Some(Content::Element(session)) = root.children.get(2) else {
            panic!("expected element");
        };
        assert_eq!(container.get("Session"), Some(&Value::Node(session.clone())));
    }

    #[test]
    fn test_push_str() {
        let mut container = Container::new();
        container.push_str("a=1\nb=two\n", FileFormat::Ini).unwrap();
        container
            .push_str("<r><c>3</c><a>x</a></r>", FileFormat::Xml)
            .unwrap();

        assert_eq!(keys(&container), vec!["a", "b", "c"]);
        assert_eq!(container.get("a"), Some(&Value::from("x")));
        assert_eq!(container.get("b"), Some(&Value::from("two")));
    }

    #[test]
    fn test_ini_inline_comment_is_not_exported() {
        let mut container = Container::new();
        container
            .push_str("a = b ; comment\n[s]\n1 = one\n", FileFormat::Ini)
            .unwrap();

        assert_eq!(container.get("a"), Some(&Value::from("b")));
        assert_eq!(container.get(1), Some(&Value::from("one")));
        assert_eq!(container.to_ini().unwrap(), "a=b\n1=one\n");
    }

    #[test]
    fn test_unrepresentable_float_keys_do_not_collide() {
        let mut container = Container::new();
        assert!(matches!(container.set(f64::INFINITY, "inf"), Err(KvError::WrongType(_))));
        assert!(matches!(container.set(f64::NAN, "nan"), Err(KvError::WrongType(_))));
        container.set(0, "zero").unwrap();
        assert!(matches!(container.set(1e300, "big"), Err(KvError::WrongType(_))));

        assert_eq!(keys(&container), vec!["0"]);
        assert_eq!(container.get(0), Some(&Value::from("zero")));
    }

    #[test]
    fn test_push_str_parse_error() {
        let mut container = Container::new();
        let result = container.push_str("<a><b></a>", FileFormat::Xml);
        assert!(matches!(result, Err(KvError::Parse(_))));
        assert!(container.is_empty());
    }

    #[test]
    fn test_push_missing_file() {
        let mut container = Container::new();
        let result = container.push(Source::file("/definitely/not/here.ini"));
        assert!(matches!(result, Err(KvError::UnsupportedSource(_))));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut container = Container::new();
        container.push(vec![("x", 1), ("y", 2)]).unwrap();

        let first: Vec<_> = container.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let second: Vec<_> = (&container)
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);

        let values: Vec<_> = container.values().cloned().collect();
        assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);

        let owned: Vec<_> = container.into_iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(owned, vec!["x", "y"]);
    }

    #[test]
    fn test_dump_array_and_text() {
        let mut container = Container::new();
        container.push(vec![("a", "1"), ("b", "2")]).unwrap();

        let array = container.dump(DumpFormat::default()).unwrap().into_array().unwrap();
        assert_eq!(&array, container.as_map());

        assert_eq!(container.dump(DumpFormat::Ini).unwrap().as_text(), Some("a=1\nb=2\n"));
        assert_eq!(container.to_json().unwrap(), r#"{"a":"1","b":"2"}"#);
        assert_eq!(
            container.dump_as("XML").unwrap().into_text().unwrap(),
            container.to_xml().unwrap()
        );
    }

    #[test]
    fn test_dump_errors() {
        let mut container = Container::new();
        container.set("list", vec![1, 2]).unwrap();

        assert!(matches!(container.dump_as("yaml"), Err(KvError::FormatNotSupported(_))));
        assert!(matches!(container.dump(DumpFormat::Ini), Err(KvError::WrongType(_))));
        assert!(matches!(container.dump(DumpFormat::Xml), Err(KvError::WrongType(_))));
        assert!(container.dump(DumpFormat::Json).is_ok());

        let mut container = Container::new();
        container.set("node", Element::new("a b")).unwrap();
        assert!(matches!(container.dump(DumpFormat::Xml), Err(KvError::WrongType(_))));
    }

    #[test]
    fn test_with_config() {
        let config = ContainerConfig::from_json("{ xml: { root: 'store' }, ini: { line_ending: '\\r\\n' } }")
            .unwrap();
        let mut container = Container::from(config);
        container.set("a", 1).unwrap();

        assert_eq!(container.to_ini().unwrap(), "a=1\r\n");
        assert_eq!(
            container.to_xml().unwrap(),
            "<?xml version=\"1.0\"?>\n<store>\n  <a>1</a>\n</store>\n"
        );
    }

    #[test]
    fn test_from_iterator_and_clear() {
        let mut container: Container = vec![
            Entry::new("a", 1).unwrap(),
            Entry::new("b", 2).unwrap(),
            Entry::new("a", 3).unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(keys(&container), vec!["a", "b"]);
        assert_eq!(container["a"], Value::Int(3));
        assert_eq!(format!("{:?}", container), r#"{Text("a"): Int(3), Text("b"): Int(2)}"#);

        container.clear();
        assert!(container.is_empty());
    }
}
