use std::io::{ErrorKind, Read};

use tracing::warn;

use crate::engine::batch::{Batch, BatchCodec};
use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;

use super::header::{FRAME_HEADER_LEN, FrameHeader};

/// Blocking frame reader. One frame is consumed completely before the next
/// is started.
pub struct FrameReader<R: Read> {
    inner: R,
    limits: WireLimits,
    unusable: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R, limits: WireLimits) -> Self {
        Self {
            inner,
            limits,
            unusable: false,
        }
    }

    pub fn is_usable(&self) -> bool {
        !self.unusable
    }

    /// Reads the next frame.
    ///
    /// Returns `EndOfStream` when the peer closed before the first header
    /// byte. Stream-fatal errors (see `WireError::is_stream_fatal`) poison
    /// the reader; Schema and MalformedColumn errors only drop the frame.
    pub fn read_frame(&mut self) -> Result<Batch, WireError> {
        if self.unusable {
            return Err(WireError::StreamUnusable);
        }
        let result = self.read_frame_inner();
        if let Err(err) = &result {
            if err.is_stream_fatal() {
                self.unusable = true;
                warn!(error = %err, "frame reader marked unusable");
            }
        }
        result
    }

    fn read_frame_inner(&mut self) -> Result<Batch, WireError> {
        let mut header = [0u8; FRAME_HEADER_LEN];
        let got = read_until_full(&mut self.inner, &mut header)?;
        if got == 0 {
            return Err(WireError::EndOfStream);
        }
        if got < FRAME_HEADER_LEN {
            return Err(WireError::Framing(format!(
                "stream closed after {got} of {FRAME_HEADER_LEN} frame header bytes"
            )));
        }

        let header = FrameHeader::from_bytes(header);
        header.check(&self.limits)?;

        let mut payload = vec![0u8; header.payload_len()];
        let got = read_until_full(&mut self.inner, &mut payload)?;
        if got < payload.len() {
            return Err(WireError::Framing(format!(
                "stream closed after {got} of {} payload bytes",
                payload.len()
            )));
        }

        BatchCodec::decode(&payload, &self.limits)
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Fills `buf` unless EOF comes first; returns the number of bytes read.
fn read_until_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, WireError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
