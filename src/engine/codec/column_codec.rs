use bytes::{BufMut, BytesMut};

use crate::engine::column::{Column, StringColumn};
use crate::engine::errors::WireError;
use crate::engine::types::ColumnType;

use super::reader::{SIZE_U32, WireReader, checked_len};

/// Encodes and decodes the type-specific body of one column, i.e. everything
/// after the `type` tag and `row_count`. One implementation per wire tag.
pub trait ColumnCodec: Send + Sync {
    fn column_type(&self) -> ColumnType;

    fn encode_body(&self, column: &Column, out: &mut BytesMut) -> Result<(), WireError>;

    /// `column` is the index of the column inside its batch, for error context.
    fn decode_body(
        &self,
        reader: &mut WireReader<'_>,
        row_count: usize,
        column: usize,
    ) -> Result<Column, WireError>;
}

fn type_mismatch(expected: ColumnType, column: &Column) -> WireError {
    WireError::schema(format!(
        "{expected} codec asked to encode a {} column",
        column.column_type()
    ))
}

/// INT32, INT64, FLOAT32 and FLOAT64: the little-endian element buffer is
/// copied verbatim.
pub struct FixedWidthCodec {
    column_type: ColumnType,
    width: usize,
}

impl FixedWidthCodec {
    pub fn new(column_type: ColumnType, width: usize) -> Self {
        Self { column_type, width }
    }
}

impl ColumnCodec for FixedWidthCodec {
    fn column_type(&self) -> ColumnType {
        self.column_type
    }

    fn encode_body(&self, column: &Column, out: &mut BytesMut) -> Result<(), WireError> {
        if column.column_type() != self.column_type {
            return Err(type_mismatch(self.column_type, column));
        }
        let bytes = column
            .fixed_bytes()
            .ok_or_else(|| type_mismatch(self.column_type, column))?;
        out.put_slice(bytes);
        Ok(())
    }

    fn decode_body(
        &self,
        reader: &mut WireReader<'_>,
        row_count: usize,
        column: usize,
    ) -> Result<Column, WireError> {
        let context = format!("column {column} {} values", self.column_type);
        let len = checked_len(
            row_count,
            self.width,
            reader.position(),
            reader.remaining(),
            &context,
        )?;
        let data = reader.take(len, &context)?.to_vec();
        Column::fixed_unchecked(self.column_type, data)
    }
}

/// One byte per row, each 0 or 1.
pub struct BooleanCodec;

impl ColumnCodec for BooleanCodec {
    fn column_type(&self) -> ColumnType {
        ColumnType::Boolean
    }

    fn encode_body(&self, column: &Column, out: &mut BytesMut) -> Result<(), WireError> {
        if column.column_type() != ColumnType::Boolean {
            return Err(type_mismatch(ColumnType::Boolean, column));
        }
        let bytes = column
            .fixed_bytes()
            .ok_or_else(|| type_mismatch(ColumnType::Boolean, column))?;
        out.put_slice(bytes);
        Ok(())
    }

    fn decode_body(
        &self,
        reader: &mut WireReader<'_>,
        row_count: usize,
        column: usize,
    ) -> Result<Column, WireError> {
        let start = reader.position();
        let data = reader.take(row_count, &format!("column {column} BOOLEAN values"))?;
        if let Some(row) = data.iter().position(|b| *b > 1) {
            return Err(WireError::malformed(
                column,
                format!(
                    "row {row}: boolean byte {:#04x} at byte {} is not 0 or 1",
                    data[row],
                    start + row
                ),
            ));
        }
        Column::fixed_unchecked(ColumnType::Boolean, data.to_vec())
    }
}

/// `data_len:u32_be data start_indices:u32_le* end_indices:u32_le*`
pub struct StringCodec;

impl ColumnCodec for StringCodec {
    fn column_type(&self) -> ColumnType {
        ColumnType::String
    }

    fn encode_body(&self, column: &Column, out: &mut BytesMut) -> Result<(), WireError> {
        let strings = column
            .strings()
            .ok_or_else(|| type_mismatch(ColumnType::String, column))?;
        let data = strings.data();
        let data_len = u32::try_from(data.len()).map_err(|_| {
            WireError::schema(format!(
                "string data of {} bytes does not fit a u32 length",
                data.len()
            ))
        })?;

        out.reserve(SIZE_U32 + data.len() + strings.len() * 2 * SIZE_U32);
        out.put_u32(data_len);
        out.put_slice(data);
        for start in strings.starts() {
            out.put_u32_le(*start);
        }
        for end in strings.ends() {
            out.put_u32_le(*end);
        }
        Ok(())
    }

    fn decode_body(
        &self,
        reader: &mut WireReader<'_>,
        row_count: usize,
        column: usize,
    ) -> Result<Column, WireError> {
        let data_len = reader.read_u32_be(&format!("column {column} STRING data length"))?;
        let data = reader
            .take(data_len as usize, &format!("column {column} STRING data"))?
            .to_vec();
        let starts_ctx = format!("column {column} STRING start indices");
        let starts = reader.read_u32_le_array(row_count, &starts_ctx)?;
        let ends_ctx = format!("column {column} STRING end indices");
        let ends = reader.read_u32_le_array(row_count, &ends_ctx)?;

        StringColumn::validate(&data, &starts, &ends, column)?;
        Ok(Column::from_string_column(
            StringColumn::from_parts_unchecked(data, starts, ends),
        ))
    }
}
