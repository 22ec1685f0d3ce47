use once_cell::sync::Lazy;

use crate::engine::types::ColumnType;

use super::column_codec::{BooleanCodec, ColumnCodec, FixedWidthCodec, StringCodec};

/// Process-wide tag → codec table, built once and read-only afterwards.
pub static CODEC_REGISTRY: Lazy<CodecRegistry> = Lazy::new(CodecRegistry::new);

/// Codecs indexed by wire tag. Adding a column type means adding a
/// `ColumnType` variant, an arm in `codec_for_type`, and nothing else here.
pub struct CodecRegistry {
    codecs: Vec<Box<dyn ColumnCodec>>,
}

fn codec_for_type(column_type: ColumnType) -> Box<dyn ColumnCodec> {
    match column_type {
        ColumnType::Int32 | ColumnType::Int64 | ColumnType::Float32 | ColumnType::Float64 => {
            let width = column_type.fixed_width().unwrap_or_default();
            Box::new(FixedWidthCodec::new(column_type, width))
        }
        ColumnType::String => Box::new(StringCodec),
        ColumnType::Boolean => Box::new(BooleanCodec),
    }
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self {
            codecs: ColumnType::ALL.iter().map(|ty| codec_for_type(*ty)).collect(),
        }
    }

    /// `None` for tags this version does not know; callers reject those.
    pub fn lookup(&self, tag: u8) -> Option<&dyn ColumnCodec> {
        self.codecs.get(tag as usize).map(|c| c.as_ref())
    }

    pub fn codec_for(&self, column_type: ColumnType) -> &dyn ColumnCodec {
        self.codecs[column_type.tag() as usize].as_ref()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}
