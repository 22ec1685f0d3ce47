use std::io::Write;

use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;

pub const FRAME_HEADER_LEN: usize = 4;

/// `length:u32_be`, the byte count of the payload that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub payload_len: u32,
}

impl FrameHeader {
    pub fn new(payload_len: u32) -> Self {
        Self { payload_len }
    }

    pub fn to_bytes(self) -> [u8; FRAME_HEADER_LEN] {
        self.payload_len.to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; FRAME_HEADER_LEN]) -> Self {
        Self {
            payload_len: u32::from_be_bytes(bytes),
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), WireError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    pub fn payload_len(&self) -> usize {
        self.payload_len as usize
    }

    /// Reader-side bound check, done before the payload buffer is allocated.
    pub fn check(&self, limits: &WireLimits) -> Result<(), WireError> {
        if self.payload_len() > limits.max_frame_bytes {
            return Err(WireError::Framing(format!(
                "frame header announces {} payload bytes, limit is {}",
                self.payload_len, limits.max_frame_bytes
            )));
        }
        Ok(())
    }
}
