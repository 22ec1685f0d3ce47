use crate::engine::column::Column;
use crate::engine::errors::WireError;

use super::reader::WireReader;
use super::registry::CODEC_REGISTRY;

pub struct ColumnDecoder;

impl ColumnDecoder {
    /// Reads one column starting at the reader's position. `column` is the
    /// column's index inside its batch and only feeds error messages.
    pub fn decode_from(reader: &mut WireReader<'_>, column: usize) -> Result<Column, WireError> {
        let tag_offset = reader.position();
        let tag = reader.read_u8(&format!("column {column} type tag"))?;
        let codec = CODEC_REGISTRY.lookup(tag).ok_or_else(|| {
            WireError::schema(format!(
                "column {column}: unknown type tag {tag} at byte {tag_offset}"
            ))
        })?;
        let row_count = reader.read_u32_be(&format!("column {column} row count"))?;
        codec.decode_body(reader, row_count as usize, column)
    }

    /// Decodes a buffer holding exactly one encoded column.
    pub fn decode(bytes: &[u8]) -> Result<Column, WireError> {
        let mut reader = WireReader::new(bytes);
        let column = Self::decode_from(&mut reader, 0)?;
        if !reader.is_empty() {
            return Err(WireError::schema(format!(
                "{} trailing bytes after column at byte {}",
                reader.remaining(),
                reader.position()
            )));
        }
        Ok(column)
    }
}
