use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value as JsonValue};

/// Column element type. The discriminant is the wire tag and must never be
/// renumbered; a new type gets a new tag, a new variant and a new codec arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColumnType {
    Int32 = 0,
    Int64 = 1,
    Float32 = 2,
    Float64 = 3,
    String = 4,
    Boolean = 5,
}

impl ColumnType {
    /// All types, ordered by wire tag.
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Int32,
        ColumnType::Int64,
        ColumnType::Float32,
        ColumnType::Float64,
        ColumnType::String,
        ColumnType::Boolean,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ColumnType::Int32),
            1 => Some(ColumnType::Int64),
            2 => Some(ColumnType::Float32),
            3 => Some(ColumnType::Float64),
            4 => Some(ColumnType::String),
            5 => Some(ColumnType::Boolean),
            _ => None,
        }
    }

    /// Bytes per row for fixed-width types; `None` for STRING.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            ColumnType::Int32 | ColumnType::Float32 => Some(4),
            ColumnType::Int64 | ColumnType::Float64 => Some(8),
            ColumnType::Boolean => Some(1),
            ColumnType::String => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int32 => "INT32",
            ColumnType::Int64 => "INT64",
            ColumnType::Float32 => "FLOAT32",
            ColumnType::Float64 => "FLOAT64",
            ColumnType::String => "STRING",
            ColumnType::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INT32" | "INT" => Ok(ColumnType::Int32),
            "INT64" | "LONG" => Ok(ColumnType::Int64),
            "FLOAT32" | "FLOAT" => Ok(ColumnType::Float32),
            "FLOAT64" | "DOUBLE" => Ok(ColumnType::Float64),
            "STRING" => Ok(ColumnType::String),
            "BOOLEAN" | "BOOL" => Ok(ColumnType::Boolean),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BatchKind {
    EndOfStream = 0,
    Normal = 1,
}

impl BatchKind {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(BatchKind::EndOfStream),
            1 => Some(BatchKind::Normal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchKind::EndOfStream => "EOS",
            BatchKind::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of a single cell. STRING cells borrow from the column's
/// data buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(&'a [u8]),
    Boolean(bool),
}

impl<'a> ValueRef<'a> {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ValueRef::Int32(_) => ColumnType::Int32,
            ValueRef::Int64(_) => ColumnType::Int64,
            ValueRef::Float32(_) => ColumnType::Float32,
            ValueRef::Float64(_) => ColumnType::Float64,
            ValueRef::String(_) => ColumnType::String,
            ValueRef::Boolean(_) => ColumnType::Boolean,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ValueRef::Int32(v) => Some(*v as i64),
            ValueRef::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ValueRef::Float32(v) => Some(*v as f64),
            ValueRef::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            ValueRef::String(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueRef::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// JSON rendering; non-finite floats become `null`, strings are decoded
    /// lossily as UTF-8.
    pub fn to_json(&self) -> JsonValue {
        match self {
            ValueRef::Int32(v) => JsonValue::Number(Number::from(*v)),
            ValueRef::Int64(v) => JsonValue::Number(Number::from(*v)),
            ValueRef::Float32(v) => Number::from_f64(*v as f64)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ValueRef::Float64(v) => Number::from_f64(*v)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ValueRef::String(b) => JsonValue::String(String::from_utf8_lossy(b).into_owned()),
            ValueRef::Boolean(b) => JsonValue::Bool(*b),
        }
    }
}

impl From<i32> for ValueRef<'_> {
    fn from(v: i32) -> Self {
        ValueRef::Int32(v)
    }
}

impl From<i64> for ValueRef<'_> {
    fn from(v: i64) -> Self {
        ValueRef::Int64(v)
    }
}

impl From<f32> for ValueRef<'_> {
    fn from(v: f32) -> Self {
        ValueRef::Float32(v)
    }
}

impl From<f64> for ValueRef<'_> {
    fn from(v: f64) -> Self {
        ValueRef::Float64(v)
    }
}

impl From<bool> for ValueRef<'_> {
    fn from(v: bool) -> Self {
        ValueRef::Boolean(v)
    }
}

impl<'a> From<&'a str> for ValueRef<'a> {
    fn from(v: &'a str) -> Self {
        ValueRef::String(v.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for ValueRef<'a> {
    fn from(v: &'a [u8]) -> Self {
        ValueRef::String(v)
    }
}
