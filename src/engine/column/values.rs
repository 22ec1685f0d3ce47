use serde_json::Value as JsonValue;

use crate::engine::errors::WireError;
use crate::engine::types::{ColumnType, ValueRef};

use super::string_column::StringColumn;

/// Typed backing storage. Fixed-width variants hold `row_count * width`
/// little-endian bytes, BOOLEAN holds one byte (0 or 1) per row.
#[derive(Debug, Clone)]
pub enum ColumnPayload {
    Int32(Vec<u8>),
    Int64(Vec<u8>),
    Float32(Vec<u8>),
    Float64(Vec<u8>),
    String(StringColumn),
    Boolean(Vec<u8>),
}

impl ColumnPayload {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnPayload::Int32(_) => ColumnType::Int32,
            ColumnPayload::Int64(_) => ColumnType::Int64,
            ColumnPayload::Float32(_) => ColumnType::Float32,
            ColumnPayload::Float64(_) => ColumnType::Float64,
            ColumnPayload::String(_) => ColumnType::String,
            ColumnPayload::Boolean(_) => ColumnType::Boolean,
        }
    }

    pub(crate) fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int32 => ColumnPayload::Int32(Vec::new()),
            ColumnType::Int64 => ColumnPayload::Int64(Vec::new()),
            ColumnType::Float32 => ColumnPayload::Float32(Vec::new()),
            ColumnType::Float64 => ColumnPayload::Float64(Vec::new()),
            ColumnType::String => ColumnPayload::String(StringColumn::new()),
            ColumnType::Boolean => ColumnPayload::Boolean(Vec::new()),
        }
    }

    fn fixed_bytes(&self) -> Option<&[u8]> {
        match self {
            ColumnPayload::Int32(b)
            | ColumnPayload::Int64(b)
            | ColumnPayload::Float32(b)
            | ColumnPayload::Float64(b)
            | ColumnPayload::Boolean(b) => Some(b),
            ColumnPayload::String(_) => None,
        }
    }

    fn row_count(&self) -> usize {
        match self {
            ColumnPayload::String(s) => s.len(),
            other => {
                let width = other.column_type().fixed_width().unwrap_or(1);
                other.fixed_bytes().map(|b| b.len() / width).unwrap_or(0)
            }
        }
    }
}

/// One homogeneous, immutable column. The type is carried by the payload
/// variant so a column can never hold data of another type.
#[derive(Debug, Clone)]
pub struct Column {
    payload: ColumnPayload,
    row_count: usize,
}

impl Column {
    pub(crate) fn from_payload(payload: ColumnPayload) -> Self {
        let row_count = payload.row_count();
        Self { payload, row_count }
    }

    pub fn from_i32s<I: IntoIterator<Item = i32>>(values: I) -> Self {
        let mut data = Vec::new();
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::from_payload(ColumnPayload::Int32(data))
    }

    pub fn from_i64s<I: IntoIterator<Item = i64>>(values: I) -> Self {
        let mut data = Vec::new();
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::from_payload(ColumnPayload::Int64(data))
    }

    pub fn from_f32s<I: IntoIterator<Item = f32>>(values: I) -> Self {
        let mut data = Vec::new();
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::from_payload(ColumnPayload::Float32(data))
    }

    pub fn from_f64s<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut data = Vec::new();
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::from_payload(ColumnPayload::Float64(data))
    }

    pub fn from_bools<I: IntoIterator<Item = bool>>(values: I) -> Self {
        let data = values.into_iter().map(|b| b as u8).collect();
        Self::from_payload(ColumnPayload::Boolean(data))
    }

    pub fn from_strings<I, S>(values: I) -> Result<Self, WireError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut strings = StringColumn::new();
        for v in values {
            strings.push(v.as_ref())?;
        }
        Ok(Self::from_payload(ColumnPayload::String(strings)))
    }

    pub fn from_string_column(strings: StringColumn) -> Self {
        Self::from_payload(ColumnPayload::String(strings))
    }

    /// Wraps an already little-endian buffer for a fixed-width type. The buffer
    /// length must be `row_count * width`; BOOLEAN bytes must be 0 or 1.
    pub fn from_fixed_bytes(
        column_type: ColumnType,
        row_count: usize,
        data: Vec<u8>,
    ) -> Result<Self, WireError> {
        let width = column_type.fixed_width().ok_or_else(|| {
            WireError::schema(format!("{column_type} is not a fixed-width column type"))
        })?;
        let expected = row_count.checked_mul(width).ok_or_else(|| {
            WireError::schema(format!("{row_count} rows of {column_type} overflow"))
        })?;
        if data.len() != expected {
            return Err(WireError::schema(format!(
                "{column_type} buffer has {} bytes, expected {expected} for {row_count} rows",
                data.len()
            )));
        }
        if column_type == ColumnType::Boolean {
            if let Some(row) = data.iter().position(|b| *b > 1) {
                return Err(WireError::malformed(
                    0,
                    format!("row {row}: boolean byte {:#04x} is not 0 or 1", data[row]),
                ));
            }
        }
        Self::fixed_unchecked(column_type, data)
    }

    /// Skips the length and boolean checks; the caller has done them.
    pub(crate) fn fixed_unchecked(
        column_type: ColumnType,
        data: Vec<u8>,
    ) -> Result<Self, WireError> {
        let payload = match column_type {
            ColumnType::Int32 => ColumnPayload::Int32(data),
            ColumnType::Int64 => ColumnPayload::Int64(data),
            ColumnType::Float32 => ColumnPayload::Float32(data),
            ColumnType::Float64 => ColumnPayload::Float64(data),
            ColumnType::Boolean => ColumnPayload::Boolean(data),
            ColumnType::String => {
                return Err(WireError::schema("STRING is not a fixed-width column type"));
            }
        };
        Ok(Self::from_payload(payload))
    }

    pub fn column_type(&self) -> ColumnType {
        self.payload.column_type()
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn payload(&self) -> &ColumnPayload {
        &self.payload
    }

    /// Raw little-endian buffer for fixed-width columns.
    pub fn fixed_bytes(&self) -> Option<&[u8]> {
        self.payload.fixed_bytes()
    }

    pub fn strings(&self) -> Option<&StringColumn> {
        match &self.payload {
            ColumnPayload::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn value_at(&self, index: usize) -> Result<ValueRef<'_>, WireError> {
        if index >= self.row_count {
            return Err(WireError::IndexOutOfBounds {
                index,
                len: self.row_count,
            });
        }
        let value = match &self.payload {
            ColumnPayload::Int32(b) => ValueRef::Int32(i32::from_le_bytes(le_chunk(b, index))),
            ColumnPayload::Int64(b) => ValueRef::Int64(i64::from_le_bytes(le_chunk(b, index))),
            ColumnPayload::Float32(b) => {
                ValueRef::Float32(f32::from_le_bytes(le_chunk(b, index)))
            }
            ColumnPayload::Float64(b) => {
                ValueRef::Float64(f64::from_le_bytes(le_chunk(b, index)))
            }
            ColumnPayload::Boolean(b) => ValueRef::Boolean(b[index] != 0),
            ColumnPayload::String(s) => {
                // Ranges were validated when the column was built.
                ValueRef::String(s.get(index).unwrap_or_default())
            }
        };
        Ok(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueRef<'_>> + '_ {
        (0..self.row_count).filter_map(move |i| self.value_at(i).ok())
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "type": self.column_type().as_str(),
            "values": self.iter().map(|v| v.to_json()).collect::<Vec<_>>(),
        })
    }
}

#[inline]
fn le_chunk<const N: usize>(bytes: &[u8], index: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[index * N..(index + 1) * N]);
    out
}

/// Same type, same row count, element-wise equal. Fixed-width values compare
/// bit-for-bit so NaN payloads survive a round-trip comparison.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        if self.column_type() != other.column_type() || self.row_count != other.row_count {
            return false;
        }
        match (&self.payload, &other.payload) {
            (ColumnPayload::String(a), ColumnPayload::String(b)) => a == b,
            (a, b) => a.fixed_bytes() == b.fixed_bytes(),
        }
    }
}
