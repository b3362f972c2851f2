use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 容器键
///
/// 只允许数字或字符串。容器内部只保存规范化后的键（见 [`Key::canonical`]），
/// 因此 `Int(2)`、`Float(2.7)` 和 `Text("2")` 指向同一个位置。
#[derive(Debug, Clone)]
pub enum Key {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Key {
    /// 规范化键
    ///
    /// - 浮点数向零截断为整数，NaN、无穷大和超出 i64 范围的浮点数保持不变
    /// - 内容为规范十进制整数的字符串（如 `"42"`、`"-7"`）转为整数
    /// - 其他字符串保持不变
    pub fn canonical(self) -> Key {
        match self {
            Key::Int(i) => Key::Int(i),
            Key::Float(f) => match float_to_int(f) {
                Some(i) => Key::Int(i),
                None => Key::Float(f),
            },
            Key::Text(s) => match parse_canonical_int(&s) {
                Some(i) => Key::Int(i),
                None => Key::Text(s),
            },
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// 向零截断，结果无法用 i64 表示时返回 None
pub(crate) fn float_to_int(f: f64) -> Option<i64> {
    // i64::MAX as f64 等于 2^63，不在范围内
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// 仅接受不带前导零、不带 `+` 号、且不溢出 i64 的十进制整数
fn parse_canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s == "-0" {
        return None;
    }
    s.parse().ok()
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => a.to_bits() == b.to_bits(),
            (Key::Text(a), Key::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Key::Int(i) => i.hash(state),
            Key::Float(f) => f.to_bits().hash(state),
            Key::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Float(v) => write!(f, "{}", v),
            Key::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Text(s.clone())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::Float(f)
    }
}

impl From<f32> for Key {
    fn from(f: f32) -> Self {
        Key::Float(f as f64)
    }
}

macro_rules! impl_key_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(i: $ty) -> Self {
                    Key::Int(i as i64)
                }
            }
        )*
    };
}

impl_key_from_int!(i8, i16, i32, i64, u8, u16, u32);

// JSON 对象的键只能是字符串，serde_json 会把整数键写成带引号的数字
impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Float(f) => serializer.collect_str(f),
            Key::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Key::Text(s).canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_numeric_text() {
        assert_eq!(Key::from("42").canonical(), Key::Int(42));
        assert_eq!(Key::from("-7").canonical(), Key::Int(-7));
        assert_eq!(Key::from("0").canonical(), Key::Int(0));
    }

    #[test]
    fn test_canonical_keeps_non_canonical_text() {
        assert_eq!(Key::from("042").canonical(), Key::from("042"));
        assert_eq!(Key::from("+1").canonical(), Key::from("+1"));
        assert_eq!(Key::from("-0").canonical(), Key::from("-0"));
        assert_eq!(Key::from("1.5").canonical(), Key::from("1.5"));
        assert_eq!(Key::from("").canonical(), Key::from(""));
        assert_eq!(
            Key::from("99999999999999999999").canonical(),
            Key::from("99999999999999999999")
        );
    }

    #[test]
    fn test_canonical_float_truncates() {
        assert_eq!(Key::from(2.7).canonical(), Key::Int(2));
        assert_eq!(Key::from(-2.7).canonical(), Key::Int(-2));
        assert_eq!(Key::from(-9.2e18).canonical(), Key::Int(-9_200_000_000_000_000_000));
    }

    #[test]
    fn test_canonical_keeps_unrepresentable_float() {
        assert_eq!(Key::from(f64::INFINITY).canonical(), Key::Float(f64::INFINITY));
        assert_eq!(Key::from(1e300).canonical(), Key::Float(1e300));
        assert_eq!(Key::from(f64::NAN).canonical(), Key::Float(f64::NAN));
        assert_eq!(Key::from(9.3e18).canonical(), Key::Float(9.3e18));
        assert_ne!(Key::from(f64::INFINITY).canonical(), Key::from(1e300).canonical());
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_eq!(Key::Float(f64::NAN), Key::Float(f64::NAN));
        assert_ne!(Key::Float(1.0), Key::Int(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::Int(3).to_string(), "3");
        assert_eq!(Key::from("name").to_string(), "name");
    }

    #[test]
    fn test_json_map_key() {
        let mut map = indexmap::IndexMap::new();
        map.insert(Key::Int(1), 10);
        map.insert(Key::from("a"), 20);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"1":10,"a":20}"#);

        let back: indexmap::IndexMap<Key, i32> = serde_json::from_str(r#"{"1":10,"a":20}"#).unwrap();
        assert_eq!(back, map);
    }
}
