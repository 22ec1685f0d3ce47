use bytes::{Bytes, BytesMut};

use crate::engine::batch::{BATCH_HEADER_LEN, Batch, BatchCodec};
use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;

use super::header::{FRAME_HEADER_LEN, FrameHeader};

/// Serializes `batch` into one complete frame, header included. An
/// oversized payload is refused here, before any byte reaches a stream.
pub fn encode_frame(batch: &Batch, limits: &WireLimits) -> Result<Bytes, WireError> {
    let mut out = BytesMut::with_capacity(FRAME_HEADER_LEN + BATCH_HEADER_LEN);
    out.extend_from_slice(&[0u8; FRAME_HEADER_LEN]);
    BatchCodec::encode_into(batch, &mut out)?;

    let payload_len = out.len() - FRAME_HEADER_LEN;
    if payload_len > limits.max_frame_bytes {
        return Err(WireError::schema(format!(
            "batch from source {} encodes to {payload_len} bytes, frame limit is {}",
            batch.source_id(),
            limits.max_frame_bytes
        )));
    }
    let payload_len = u32::try_from(payload_len).map_err(|_| {
        WireError::schema(format!("payload of {payload_len} bytes overflows the u32 length prefix"))
    })?;
    out[..FRAME_HEADER_LEN].copy_from_slice(&FrameHeader::new(payload_len).to_bytes());
    Ok(out.freeze())
}
