mod batch_codec;
mod buffer;
mod envelope;


pub use batch_codec::{BATCH_HEADER_LEN, BatchCodec};
pub use buffer::BatchBuffer;
pub use envelope::Batch;
