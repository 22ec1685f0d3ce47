use crate::shared::config::model::WireConfig;

pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_MAX_COLUMNS: usize = 1024;
/// Rows per batch assembled by `BatchBuffer`.
pub const DEFAULT_BATCH_ROWS: usize = 100;

/// Bounds enforced while building, framing and decoding batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireLimits {
    pub max_frame_bytes: usize,
    pub max_columns: usize,
    pub batch_rows: usize,
}

impl Default for WireLimits {
    fn default() -> Self {
        Self {
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            max_columns: DEFAULT_MAX_COLUMNS,
            batch_rows: DEFAULT_BATCH_ROWS,
        }
    }
}

impl WireLimits {
    pub fn from_settings(cfg: &WireConfig) -> Self {
        Self {
            // The length prefix is a u32.
            max_frame_bytes: cfg.max_frame_bytes.min(u32::MAX as usize),
            max_columns: cfg.max_columns,
            batch_rows: cfg.batch_rows.max(1),
        }
    }

    pub fn with_max_frame_bytes(mut self, max_frame_bytes: usize) -> Self {
        self.max_frame_bytes = max_frame_bytes.min(u32::MAX as usize);
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_batch_rows(mut self, batch_rows: usize) -> Self {
        self.batch_rows = batch_rows.max(1);
        self
    }
}
