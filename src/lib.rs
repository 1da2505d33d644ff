//! Incremental LZ4 frame compression and decompression streams.
//!
//! Two symmetric, independently usable stateful objects wrap liblz4's
//! block-oriented frame primitives so that cache and archive pipelines can
//! produce and consume compressed streams chunk by chunk, without holding
//! whole payloads in memory:
//!
//! - [`CompressionStream`] owns a codec context and a worst-case-sized
//!   output buffer; it emits the frame header once, then the compressed
//!   representation of each fed chunk, and [`finish`] closes the frame.
//! - [`DecompressionStream`] assembles the frame header across arbitrarily
//!   fragmented feeds, sizes its input buffer from the header's block-size
//!   class, and then alternates accumulate / decode / compact.
//!
//! Each `feed` returns a borrowed view into stream-owned memory, valid only
//! until the next call on the same stream; callers needing retention must
//! copy. Every fatal error poisons the stream it occurred on — drop it and
//! start a new session.
//!
//! The codec primitive sits behind the narrow traits in [`codec`], so the
//! stream state machines are testable without the native library; the
//! default provider is `lz4::liblz4`.
//!
//! [`finish`]: CompressionStream::finish

pub mod buffer;
pub mod codec;
pub mod error;
pub mod frame;
pub mod stream;

pub use codec::lz4f::{Lz4fCompressor, Lz4fDecompressor};
pub use codec::{BlockDecode, CodecFailure, CompressContext, DecompressContext};
pub use error::{Result, StreamError};
pub use frame::{BlockSizeClass, DECODE_CHUNK_MAX, DEFAULT_MAX_CHUNK, FRAME_HEADER_SIZE};
pub use stream::{CompressionStream, DecodeStage, DecompressionStream};
