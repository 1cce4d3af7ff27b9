//! Loosely typed definition records.
//!
//! Upstream definition files are hand-edited YAML, so the same field can show
//! up as a string in one record and an integer (or nothing at all) in another.
//! A `Record` keeps whatever the decoder produced and exposes *total*
//! accessors: a field that is absent or has an unexpected type never fails,
//! it yields the documented fallback instead.
//!
//! | accessor      | fallback |
//! |---------------|----------|
//! | `get_str`     | `""`     |
//! | `get_bool`    | `false`  |
//! | `get_int`     | `-1`     |
//! | `get_char`    | `'\0'`   |

use std::collections::BTreeMap;

/// A single dynamically typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Char(char),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

/// Field name → value mapping for one entry of a definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Whether `key` is present, regardless of its type.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Text value of `key`, or `""` when absent or not text.
    pub fn get_str(&self, key: &str) -> &str {
        match self.fields.get(key) {
            Some(Value::Str(s)) => s,
            _ => "",
        }
    }

    /// Like [`Record::get_str`] but substitutes `fallback` for an empty result.
    pub fn get_str_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        match self.get_str(key) {
            "" => fallback,
            s => s,
        }
    }

    /// Character value of `key`.
    ///
    /// Text values yield their first character. Anything else yields `'\0'`.
    pub fn get_char(&self, key: &str) -> char {
        match self.fields.get(key) {
            Some(Value::Char(c)) => *c,
            Some(Value::Str(s)) => s.chars().next().unwrap_or('\0'),
            _ => '\0',
        }
    }

    /// Boolean value of `key`, or `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(Value::Bool(true)))
    }

    /// Integer value of `key`.
    ///
    /// Text that parses as a decimal integer (`"001"`, `"-3"`) is accepted.
    /// Anything else yields `-1`.
    pub fn get_int(&self, key: &str) -> i64 {
        match self.fields.get(key) {
            Some(Value::Int(n)) => *n,
            Some(Value::Str(s)) => s.parse::<i64>().unwrap_or(-1),
            _ => -1,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
