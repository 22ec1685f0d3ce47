use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::engine::codec::{ColumnDecoder, ColumnEncoder, WireReader};
use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;
use crate::engine::types::BatchKind;

use super::envelope::Batch;

/// kind:u8 + source_id:i64 + column_count:u32
pub const BATCH_HEADER_LEN: usize = 1 + 8 + 4;

/// Payload layout: `kind:u8 source_id:i64_be column_count:u32_be Column*`.
/// Column order on the wire is the batch's column order.
pub struct BatchCodec;

impl BatchCodec {
    pub fn encode_into(batch: &Batch, out: &mut BytesMut) -> Result<(), WireError> {
        let column_count = u32::try_from(batch.column_count()).map_err(|_| {
            WireError::schema(format!("{} columns overflow u32", batch.column_count()))
        })?;

        out.put_u8(batch.kind().tag());
        out.put_i64(batch.source_id());
        out.put_u32(column_count);
        for column in batch.columns() {
            ColumnEncoder::encode_into(column, out)?;
        }
        Ok(())
    }

    pub fn encode(batch: &Batch) -> Result<Bytes, WireError> {
        let mut out = BytesMut::with_capacity(BATCH_HEADER_LEN);
        Self::encode_into(batch, &mut out)?;
        Ok(out.freeze())
    }

    /// Decodes one payload. Row-count equality and the EOS rule are checked
    /// again here rather than trusted from the producer.
    pub fn decode(payload: &[u8], limits: &WireLimits) -> Result<Batch, WireError> {
        if payload.is_empty() {
            return Err(WireError::schema(
                "empty payload: a batch needs at least kind, source_id and column_count",
            ));
        }

        let mut reader = WireReader::new(payload);
        let kind_tag = reader.read_u8("batch kind")?;
        let kind = BatchKind::from_tag(kind_tag).ok_or_else(|| {
            WireError::schema(format!("unknown batch kind tag {kind_tag} at byte 0"))
        })?;
        let source_id = reader.read_i64_be("batch source_id")?;
        let column_count = reader.read_u32_be("batch column_count")? as usize;

        if kind == BatchKind::EndOfStream && column_count != 0 {
            return Err(WireError::schema(format!(
                "EOS batch from source {source_id} declares {column_count} columns"
            )));
        }
        if column_count > limits.max_columns {
            return Err(WireError::schema(format!(
                "batch from source {source_id} declares {column_count} columns, limit is {}",
                limits.max_columns
            )));
        }

        let mut columns = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            columns.push(ColumnDecoder::decode_from(&mut reader, idx)?);
        }

        if !reader.is_empty() {
            return Err(WireError::schema(format!(
                "{} trailing bytes after last column at byte {}",
                reader.remaining(),
                reader.position()
            )));
        }

        // Re-checks row-count equality across the decoded columns.
        let batch = Batch::build(kind, source_id, columns, limits)?;
        debug!(
            source_id,
            kind = kind.as_str(),
            columns = batch.column_count(),
            rows = batch.row_count(),
            bytes = payload.len(),
            "decoded batch"
        );
        Ok(batch)
    }
}
