use crate::engine::errors::WireError;
use crate::engine::types::{ColumnType, ValueRef};

use super::values::{Column, ColumnPayload};

/// Append-only builder; `finish` hands back an immutable `Column`.
#[derive(Debug)]
pub struct ColumnBuilder {
    payload: ColumnPayload,
    len: usize,
}

impl ColumnBuilder {
    pub fn new(column_type: ColumnType) -> Self {
        Self {
            payload: ColumnPayload::empty(column_type),
            len: 0,
        }
    }

    pub fn with_capacity(column_type: ColumnType, rows: usize) -> Self {
        let mut builder = Self::new(column_type);
        if let Some(width) = column_type.fixed_width() {
            if let Some(buf) = builder.fixed_buffer_mut() {
                buf.reserve(rows * width);
            }
        }
        builder
    }

    pub fn column_type(&self) -> ColumnType {
        self.payload.column_type()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends one value; a value of another type is rejected and the
    /// builder is left unchanged.
    pub fn push(&mut self, value: ValueRef<'_>) -> Result<(), WireError> {
        match (&mut self.payload, value) {
            (ColumnPayload::Int32(buf), ValueRef::Int32(v)) => {
                buf.extend_from_slice(&v.to_le_bytes())
            }
            (ColumnPayload::Int64(buf), ValueRef::Int64(v)) => {
                buf.extend_from_slice(&v.to_le_bytes())
            }
            (ColumnPayload::Float32(buf), ValueRef::Float32(v)) => {
                buf.extend_from_slice(&v.to_le_bytes())
            }
            (ColumnPayload::Float64(buf), ValueRef::Float64(v)) => {
                buf.extend_from_slice(&v.to_le_bytes())
            }
            (ColumnPayload::Boolean(buf), ValueRef::Boolean(v)) => buf.push(v as u8),
            (ColumnPayload::String(strings), ValueRef::String(bytes)) => strings.push(bytes)?,
            (payload, value) => {
                return Err(WireError::schema(format!(
                    "cannot append {} value to {} column",
                    value.column_type(),
                    payload.column_type()
                )));
            }
        }
        self.len += 1;
        Ok(())
    }

    pub fn finish(self) -> Column {
        Column::from_payload(self.payload)
    }

    fn fixed_buffer_mut(&mut self) -> Option<&mut Vec<u8>> {
        match &mut self.payload {
            ColumnPayload::Int32(b)
            | ColumnPayload::Int64(b)
            | ColumnPayload::Float32(b)
            | ColumnPayload::Float64(b)
            | ColumnPayload::Boolean(b) => Some(b),
            ColumnPayload::String(_) => None,
        }
    }
}
