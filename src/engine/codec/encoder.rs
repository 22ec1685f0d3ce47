use bytes::{BufMut, Bytes, BytesMut};

use crate::engine::column::Column;
use crate::engine::errors::WireError;

use super::registry::CODEC_REGISTRY;

pub struct ColumnEncoder;

impl ColumnEncoder {
    /// Appends `type:u8 row_count:u32_be body` to `out`.
    pub fn encode_into(column: &Column, out: &mut BytesMut) -> Result<(), WireError> {
        let row_count = u32::try_from(column.len()).map_err(|_| {
            WireError::schema(format!(
                "{} column has {} rows, more than a u32 row_count allows",
                column.column_type(),
                column.len()
            ))
        })?;
        let codec = CODEC_REGISTRY.codec_for(column.column_type());

        out.put_u8(column.column_type().tag());
        out.put_u32(row_count);
        codec.encode_body(column, out)
    }

    pub fn encode(column: &Column) -> Result<Bytes, WireError> {
        let mut out = BytesMut::new();
        Self::encode_into(column, &mut out)?;
        Ok(out.freeze())
    }
}
