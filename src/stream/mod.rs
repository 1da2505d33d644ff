//! The two streaming objects: one compressed frame per stream instance.

pub mod compress;
pub mod decompress;

pub use compress::CompressionStream;
pub use decompress::{DecodeStage, DecompressionStream};
