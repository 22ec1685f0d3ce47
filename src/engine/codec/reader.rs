use crate::engine::errors::WireError;

pub const SIZE_U8: usize = 1;
pub const SIZE_U32: usize = 4;
pub const SIZE_I64: usize = 8;

/// Bounds-checked cursor over an encoded payload. Every failed read reports
/// the absolute byte offset it started at.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn take(&mut self, n: usize, context: &str) -> Result<&'a [u8], WireError> {
        if self.remaining() < n {
            return Err(WireError::TruncatedInput {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
                context: context.to_string(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, context: &str) -> Result<u8, WireError> {
        Ok(self.take(SIZE_U8, context)?[0])
    }

    pub fn read_u32_be(&mut self, context: &str) -> Result<u32, WireError> {
        let mut out = [0u8; SIZE_U32];
        out.copy_from_slice(self.take(SIZE_U32, context)?);
        Ok(u32::from_be_bytes(out))
    }

    pub fn read_i64_be(&mut self, context: &str) -> Result<i64, WireError> {
        let mut out = [0u8; SIZE_I64];
        out.copy_from_slice(self.take(SIZE_I64, context)?);
        Ok(i64::from_be_bytes(out))
    }

    /// Reads `count` little-endian u32 values.
    pub fn read_u32_le_array(
        &mut self,
        count: usize,
        context: &str,
    ) -> Result<Vec<u32>, WireError> {
        let needed = checked_len(count, SIZE_U32, self.pos, self.remaining(), context)?;
        let bytes = self.take(needed, context)?;
        Ok(bytes
            .chunks_exact(SIZE_U32)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

/// `count * width`, reported as truncation when it cannot even be represented.
pub(crate) fn checked_len(
    count: usize,
    width: usize,
    offset: usize,
    remaining: usize,
    context: &str,
) -> Result<usize, WireError> {
    count
        .checked_mul(width)
        .ok_or_else(|| WireError::TruncatedInput {
            offset,
            needed: usize::MAX,
            remaining,
            context: context.to_string(),
        })
}
