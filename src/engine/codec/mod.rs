mod column_codec;
mod decoder;
mod encoder;
mod reader;
mod registry;

#[cfg(test)]
mod column_codec_test;
#[cfg(test)]
mod decoder_test;
#[cfg(test)]
mod registry_test;

pub use column_codec::{BooleanCodec, ColumnCodec, FixedWidthCodec, StringCodec};
pub use decoder::ColumnDecoder;
pub use encoder::ColumnEncoder;
pub use reader::WireReader;
pub use registry::{CODEC_REGISTRY, CodecRegistry};
