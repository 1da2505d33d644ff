//! Codec provider capability.
//!
//! The streams never talk to liblz4 directly; they go through these two
//! narrow traits. The default provider in [`lz4f`] wraps the real `LZ4F_*`
//! contexts, and the deterministic fake in `fake` (test builds only) lets
//! the stream state machines be exercised without the native library.

pub mod lz4f;

#[cfg(test)]
pub mod fake;

/// Opaque failure reported by a codec provider.
///
/// Carries the operation that failed and whatever detail the provider can
/// give (for liblz4, the `LZ4F_getErrorName` string). Stream code treats it
/// as fatal and does not interpret it further.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{op}: {detail}")]
pub struct CodecFailure {
    op: &'static str,
    detail: String,
}

impl CodecFailure {
    pub fn new(op: &'static str, detail: impl Into<String>) -> Self {
        CodecFailure {
            op,
            detail: detail.into(),
        }
    }

    /// The provider operation that failed.
    pub fn operation(&self) -> &'static str {
        self.op
    }
}

/// Result of one block-decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDecode {
    /// Input bytes the primitive actually consumed.
    pub consumed: usize,
    /// Output bytes written into the destination buffer.
    pub produced: usize,
}

/// One compression session: header generation plus block-at-a-time
/// compression into caller-provided buffers.
pub trait CompressContext {
    /// Worst-case compressed size for a `src_size`-byte input, used to size
    /// the stream's output buffer once at construction.
    fn worst_case_bound(&self, src_size: usize) -> usize;

    /// Render the frame header into the front of `dst`; returns the number
    /// of significant bytes written.
    fn begin_frame(&mut self, dst: &mut [u8]) -> std::result::Result<usize, CodecFailure>;

    /// Compress one plaintext chunk into `dst`; returns bytes written.
    /// `dst` must be at least `worst_case_bound(src.len())` bytes.
    fn compress_block(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
    ) -> std::result::Result<usize, CodecFailure>;

    /// Flush any internally buffered tail data and write the end-of-frame
    /// marker into `dst`; returns bytes written.
    fn end_frame(&mut self, dst: &mut [u8]) -> std::result::Result<usize, CodecFailure>;
}

/// One decompression session: header inspection plus block-at-a-time
/// decompression with explicit consumed/produced accounting.
pub trait DecompressContext {
    /// Parse a complete frame header and return the wire block-size class
    /// selector it declares.
    fn parse_frame_header(&mut self, header: &[u8]) -> std::result::Result<u32, CodecFailure>;

    /// Decode buffered compressed bytes into `dst`. The primitive reports
    /// how much input it consumed and how much output it produced; either
    /// may be zero when it needs more data or more output space.
    fn decompress_block(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
    ) -> std::result::Result<BlockDecode, CodecFailure>;
}
