use std::io::ErrorKind;
use std::sync::atomic::AtomicBool;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::debug;

use crate::engine::batch::{Batch, BatchCodec};
use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;

use super::encode::encode_frame;
use super::guard::{PoisonGuard, is_unusable, mark_unusable};
use super::header::{FRAME_HEADER_LEN, FrameHeader};

/// Async counterpart of `FrameWriter`. Dropping a `write_frame` future after
/// it started writing marks the writer unusable.
pub struct AsyncFrameWriter<W> {
    inner: Mutex<W>,
    limits: WireLimits,
    unusable: AtomicBool,
}

impl<W: AsyncWrite + Unpin> AsyncFrameWriter<W> {
    pub fn new(inner: W, limits: WireLimits) -> Self {
        Self {
            inner: Mutex::new(inner),
            limits,
            unusable: AtomicBool::new(false),
        }
    }

    pub fn limits(&self) -> &WireLimits {
        &self.limits
    }

    pub fn is_usable(&self) -> bool {
        !is_unusable(&self.unusable)
    }

    pub async fn write_frame(&self, batch: &Batch) -> Result<usize, WireError> {
        if !self.is_usable() {
            return Err(WireError::StreamUnusable);
        }
        let frame = encode_frame(batch, &self.limits)?;

        let mut inner = self.inner.lock().await;
        if !self.is_usable() {
            return Err(WireError::StreamUnusable);
        }
        let guard = PoisonGuard::arm(&self.unusable, "async frame writer");
        inner.write_all(&frame).await?;
        inner.flush().await?;
        guard.disarm();

        debug!(
            source_id = batch.source_id(),
            kind = batch.kind().as_str(),
            columns = batch.column_count(),
            bytes = frame.len(),
            "wrote frame"
        );
        Ok(frame.len())
    }

    pub async fn write_end_of_stream(&self, source_id: i64) -> Result<usize, WireError> {
        self.write_frame(&Batch::end_of_stream(source_id)).await
    }

    /// Shuts down the write half so the peer sees a clean EOF.
    pub async fn shutdown(&self) -> Result<(), WireError> {
        let mut inner = self.inner.lock().await;
        inner.shutdown().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

/// Async counterpart of `FrameReader`. Waiting for the first header byte is
/// cancel-safe; cancelling after that marks the reader unusable.
pub struct AsyncFrameReader<R> {
    inner: R,
    limits: WireLimits,
    unusable: AtomicBool,
}

impl<R: AsyncRead + Unpin> AsyncFrameReader<R> {
    pub fn new(inner: R, limits: WireLimits) -> Self {
        Self {
            inner,
            limits,
            unusable: AtomicBool::new(false),
        }
    }

    pub fn is_usable(&self) -> bool {
        !is_unusable(&self.unusable)
    }

    pub async fn read_frame(&mut self) -> Result<Batch, WireError> {
        if !self.is_usable() {
            return Err(WireError::StreamUnusable);
        }
        let result = self.read_frame_inner().await;
        if let Err(err) = &result {
            if err.is_stream_fatal() {
                mark_unusable(&self.unusable, "async frame reader", &err.to_string());
            }
        }
        result
    }

    async fn read_frame_inner(&mut self) -> Result<Batch, WireError> {
        let Self {
            inner,
            limits,
            unusable,
        } = self;

        let mut header = [0u8; FRAME_HEADER_LEN];
        let first = loop {
            match inner.read(&mut header).await {
                Ok(0) => return Err(WireError::EndOfStream),
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        let guard = PoisonGuard::arm(unusable, "async frame reader");
        let got = first + read_until_full(inner, &mut header[first..]).await?;
        if got < FRAME_HEADER_LEN {
            return Err(WireError::Framing(format!(
                "stream closed after {got} of {FRAME_HEADER_LEN} frame header bytes"
            )));
        }

        let header = FrameHeader::from_bytes(header);
        header.check(limits)?;

        let mut payload = vec![0u8; header.payload_len()];
        let got = read_until_full(inner, &mut payload).await?;
        if got < payload.len() {
            return Err(WireError::Framing(format!(
                "stream closed after {got} of {} payload bytes",
                payload.len()
            )));
        }
        guard.disarm();

        BatchCodec::decode(&payload, limits)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

async fn read_until_full<R: AsyncRead + Unpin>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<usize, WireError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
