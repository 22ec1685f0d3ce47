mod async_io;
mod encode;
mod guard;
mod header;
mod reader;
mod writer;


pub use async_io::{AsyncFrameReader, AsyncFrameWriter};
pub use encode::encode_frame;
pub use header::{FRAME_HEADER_LEN, FrameHeader};
pub use reader::FrameReader;
pub use writer::FrameWriter;
