//! Error taxonomy shared by both stream types.
//!
//! Construction-time failures ([`StreamError::Allocation`],
//! [`StreamError::ContextCreation`]) mean no stream object was handed out and
//! there is nothing to clean up. Every per-feed failure is terminal: the
//! stream moves to its failed state and later calls return
//! [`StreamError::Failed`].

use crate::codec::CodecFailure;

/// Errors raised by [`CompressionStream`](crate::CompressionStream) and
/// [`DecompressionStream`](crate::DecompressionStream).
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A stream-owned buffer could not be allocated.
    #[error("failed to allocate {bytes}-byte stream buffer")]
    Allocation { bytes: usize },

    /// The codec provider could not create a compression or decompression
    /// context.
    #[error("codec context creation failed: {0}")]
    ContextCreation(#[source] CodecFailure),

    /// A fed chunk exceeds the maximum size fixed at stream construction.
    /// Caller contract violation.
    #[error("chunk of {len} bytes exceeds configured maximum of {max}")]
    OversizedChunk { len: usize, max: usize },

    /// The frame header declares a block-size class this implementation does
    /// not recognize.
    #[error("frame header declares unsupported block-size class {class}")]
    UnsupportedBlockSize { class: u32 },

    /// More undecoded input was fed than one block can ever hold. Caller
    /// contract violation.
    #[error("input overflow: {buffered} buffered + {incoming} incoming bytes exceed {capacity}-byte block capacity")]
    BufferOverflow {
        buffered: usize,
        incoming: usize,
        capacity: usize,
    },

    /// The underlying codec primitive rejected the data (e.g. a corrupted
    /// compressed stream).
    #[error(transparent)]
    Codec(#[from] CodecFailure),

    /// The stream was already poisoned by an earlier fatal error and must be
    /// dropped.
    #[error("stream has failed and can no longer be fed")]
    Failed,
}

pub type Result<T> = std::result::Result<T, StreamError>;
