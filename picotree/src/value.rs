// SPDX-License-Identifier: Apache-2.0

//! The owned value tree produced by the parser.
//!
//! Every node exclusively owns its payload and, for containers, all of its
//! children. Dropping the root releases the whole tree in a single walk.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::parse_error::ParseError;

// Type alias for the configured integer type
#[cfg(feature = "int32")]
pub type ConfiguredInt = i32;
#[cfg(feature = "int64")]
pub type ConfiguredInt = i64;

/// An ordered list of values.
pub type List = Vec<Value>;

/// Payload-free tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Dictionary,
    List,
    String,
    Integer,
    Float,
    Boolean,
}

impl ValueKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Dictionary => "dictionary",
            ValueKind::List => "list",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
        }
    }

    /// True for the kinds that own child values.
    pub const fn is_container(&self) -> bool {
        matches!(self, ValueKind::Dictionary | ValueKind::List)
    }
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single JSON entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Dictionary(Dictionary),
    List(List),
    String(String),
    Integer(ConfiguredInt),
    Float(f32),
    Boolean(bool),
}

/// Key/value pairs in insertion order.
///
/// Keys are not required to be unique. Every duplicate is kept, and lookups
/// by key return the first match unless stated otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, Value)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Dictionary {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry after all existing ones, even if `key` is already present.
    pub fn append(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push((key.into(), value));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Mutable reference to the first value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Last value stored under `key`.
    pub fn get_last(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entry at `index` in insertion order.
    pub fn entry_at(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries.get(index).map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl IntoIterator for Dictionary {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Dictionary {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Value {
    /// Empty dictionary value.
    pub fn dictionary() -> Self {
        Value::Dictionary(Dictionary::new())
    }

    /// Empty list value.
    pub fn list() -> Self {
        Value::List(List::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Dictionary(_) => ValueKind::Dictionary,
            Value::List(_) => ValueKind::List,
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Adds a child to this container.
    ///
    /// Dictionaries require a key; lists ignore it. Scalars cannot hold
    /// children and report a type mismatch.
    pub fn append(&mut self, key: Option<String>, value: Value) -> Result<(), ParseError> {
        match self {
            Value::Dictionary(dict) => match key {
                Some(key) => {
                    dict.append(key, value);
                    Ok(())
                }
                None => Err(crate::parse_error::UnexpectedState::MissingKey.into()),
            },
            Value::List(list) => {
                list.push(value);
                Ok(())
            }
            other => {
                let expected = if key.is_some() {
                    ValueKind::Dictionary
                } else {
                    ValueKind::List
                };
                Err(ParseError::mismatch(expected, other.kind()))
            }
        }
    }

    /// Moves the direct children out, leaving this container empty.
    fn take_children(&mut self, into: &mut Vec<Value>) {
        match self {
            Value::Dictionary(d) => {
                into.extend(mem::take(&mut d.entries).into_iter().map(|(_, v)| v));
            }
            Value::List(l) => into.append(l),
            _ => {}
        }
    }

    // Copying accessors

    pub fn try_get_dict(&self) -> Result<Dictionary, ParseError> {
        self.as_dict().cloned()
    }

    pub fn try_get_list(&self) -> Result<List, ParseError> {
        self.as_list().cloned()
    }

    pub fn try_get_string(&self) -> Result<String, ParseError> {
        self.as_str().map(String::from)
    }

    pub fn try_get_int(&self) -> Result<ConfiguredInt, ParseError> {
        match self {
            Value::Integer(i) => Ok(*i),
            other => Err(ParseError::mismatch(ValueKind::Integer, other.kind())),
        }
    }

    pub fn try_get_float(&self) -> Result<f32, ParseError> {
        match self {
            Value::Float(f) => Ok(*f),
            other => Err(ParseError::mismatch(ValueKind::Float, other.kind())),
        }
    }

    pub fn try_get_bool(&self) -> Result<bool, ParseError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(ParseError::mismatch(ValueKind::Boolean, other.kind())),
        }
    }

    // Borrowing accessors

    pub fn as_dict(&self) -> Result<&Dictionary, ParseError> {
        match self {
            Value::Dictionary(d) => Ok(d),
            other => Err(ParseError::mismatch(ValueKind::Dictionary, other.kind())),
        }
    }

    pub fn as_dict_mut(&mut self) -> Result<&mut Dictionary, ParseError> {
        match self {
            Value::Dictionary(d) => Ok(d),
            other => Err(ParseError::mismatch(ValueKind::Dictionary, other.kind())),
        }
    }

    pub fn as_list(&self) -> Result<&List, ParseError> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(ParseError::mismatch(ValueKind::List, other.kind())),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut List, ParseError> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(ParseError::mismatch(ValueKind::List, other.kind())),
        }
    }

    pub fn as_str(&self) -> Result<&str, ParseError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(ParseError::mismatch(ValueKind::String, other.kind())),
        }
    }

    /// Follows `path` through nested dictionaries, taking the first entry
    /// for each key. Returns `None` if a key is missing or a step is not a
    /// dictionary.
    pub fn pointer(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(self, |node, key| node.as_dict().ok()?.get(key))
    }

    /// Container nesting depth of this tree: 0 for scalars, 1 for a
    /// container holding only scalars (or nothing), and so on.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut pending: Vec<(&Value, usize)> = Vec::new();
        pending.push((self, 0));
        while let Some((node, level)) = pending.pop() {
            let level = level + 1;
            match node {
                Value::Dictionary(d) => pending.extend(d.values().map(|child| (child, level))),
                Value::List(l) => pending.extend(l.iter().map(|child| (child, level))),
                _ => continue,
            }
            max_depth = max_depth.max(level);
        }
        max_depth
    }

    /// Depth of this tree counted from a node that already sits at `start`.
    pub fn relative_depth(&self, start: usize) -> usize {
        start.saturating_add(self.depth())
    }
}

// Nested containers are released through a heap worklist so that dropping a
// deep tree cannot overflow the call stack.
impl Drop for Value {
    fn drop(&mut self) {
        let has_nested = match self {
            Value::Dictionary(d) => d.values().any(|v| v.kind().is_container()),
            Value::List(l) => l.iter().any(|v| v.kind().is_container()),
            _ => false,
        };
        if !has_nested {
            return;
        }
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<ConfiguredInt> for Value {
    fn from(i: ConfiguredInt) -> Self {
        Value::Integer(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dictionary(d)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Dictionary(d) => write!(f, "dictionary({})", d.len()),
            Value::List(l) => write!(f, "list({})", l.len()),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}
