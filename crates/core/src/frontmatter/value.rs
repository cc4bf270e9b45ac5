//! Frontmatter values: a closed recursive YAML value type and an
//! insertion-ordered mapping of field names to values.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Metadata),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Metadata> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Metadata> for Value {
    fn from(map: Metadata) -> Self {
        Value::Mapping(map)
    }
}

/// Insertion-ordered mapping from field name to value.
///
/// Inserting an existing key replaces its value without moving it; new keys
/// are appended. Equality ignores key order.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: Vec<(String, Value)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert a field, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of this mapping restricted to `fields`, in this mapping's order.
    /// Requested fields that are absent are skipped.
    pub fn project<S: AsRef<str>>(&self, fields: &[S]) -> Metadata {
        self.entries
            .iter()
            .filter(|(k, _)| fields.iter().any(|f| f.as_ref() == k.as_str()))
            .cloned()
            .collect()
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Metadata::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Metadata {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Metadata {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl TryFrom<Value> for Metadata {
    /// The value is handed back when it is not a mapping.
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(map) => Ok(map),
            other => Err(other),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(seq) => seq.serialize(serializer),
            Value::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Integer(n))
    }

    fn visit_u64<E>(self, n: u64) -> Result<Value, E> {
        Ok(match i64::try_from(n) {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Float(n as f64),
        })
    }

    fn visit_f64<E>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Float(f))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Metadata::new();
        while let Some((MapKey(k), v)) = access.next_entry::<MapKey, Value>()? {
            map.insert(k, v);
        }
        Ok(Value::Mapping(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Mapping(map) => Ok(map),
            Value::Null => Ok(Metadata::new()),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.type_name()),
                &"a mapping",
            )),
        }
    }
}

/// Mapping key. YAML allows scalar keys of any type; they are stringified.
struct MapKey(String);

struct MapKeyVisitor;

impl Visitor<'_> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_bool<E>(self, b: bool) -> Result<MapKey, E> {
        Ok(MapKey(b.to_string()))
    }

    fn visit_i64<E>(self, n: i64) -> Result<MapKey, E> {
        Ok(MapKey(n.to_string()))
    }

    fn visit_u64<E>(self, n: u64) -> Result<MapKey, E> {
        Ok(MapKey(n.to_string()))
    }

    fn visit_f64<E>(self, f: f64) -> Result<MapKey, E> {
        Ok(MapKey(f.to_string()))
    }

    fn visit_str<E>(self, s: &str) -> Result<MapKey, E> {
        Ok(MapKey(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> Result<MapKey, E> {
        Ok(MapKey(s))
    }

    fn visit_unit<E>(self) -> Result<MapKey, E> {
        Ok(MapKey("null".to_string()))
    }
}

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_existing_key_keeps_position() {
        let mut map: Metadata = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let prev = map.insert("b", 20);
        assert_eq!(prev, Some(Value::Integer(2)));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(map.get("b").and_then(Value::as_i64), Some(20));
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut map: Metadata = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert!(map.remove("b").is_some());
        assert!(map.remove("missing").is_none());
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn equality_ignores_key_order() {
        let left: Metadata = [("a", 1), ("b", 2)].into_iter().collect();
        let right: Metadata = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(left, right);

        let different: Metadata = [("a", 1), ("b", 3)].into_iter().collect();
        assert_ne!(left, different);
    }

    #[test]
    fn project_skips_absent_fields() {
        let map: Metadata =
            [("title", "T"), ("author", "A"), ("date", "D")].into_iter().collect();
        let projected = map.project(&["author", "title", "missing"]);
        assert_eq!(projected.keys().collect::<Vec<_>>(), ["title", "author"]);
    }

    #[test]
    fn deserialize_json_preserves_key_order() {
        let map: Metadata =
            serde_json::from_str(r#"{"zeta": 1, "alpha": [true, null], "mid": {"x": 1.5}}"#)
                .unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(
            map.get("alpha"),
            Some(&Value::Sequence(vec![Value::Bool(true), Value::Null]))
        );
        let mid = map.get("mid").and_then(Value::as_mapping).unwrap();
        assert_eq!(mid.get("x").and_then(Value::as_f64), Some(1.5));
    }

    #[test]
    fn deserialize_yaml_stringifies_scalar_keys() {
        let map: Metadata = serde_yaml::from_str("1: one\ntrue: yes\n~: empty\nn: ~\n").unwrap();
        assert_eq!(map.get("1").and_then(Value::as_str), Some("one"));
        assert!(map.contains_key("true"));
        assert_eq!(map.get("null").and_then(Value::as_str), Some("empty"));
        assert!(map.get("n").is_some_and(Value::is_null));
    }

    #[test]
    fn serialize_to_json_in_insertion_order() {
        let mut map = Metadata::new();
        map.insert("title", "Hello");
        map.insert("draft", false);
        map.insert("tags", vec!["a", "b"]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"title":"Hello","draft":false,"tags":["a","b"]}"#);
    }

    #[test]
    fn try_from_non_mapping_returns_value() {
        let err = Metadata::try_from(Value::from("text")).unwrap_err();
        assert_eq!(err.type_name(), "string");
    }
}
