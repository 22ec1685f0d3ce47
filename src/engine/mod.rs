pub mod batch;
pub mod codec;
pub mod column;
pub mod errors;
pub mod frame;
pub mod limits;
pub mod types;

pub use errors::*;
