//! Streaming frame decompression.
//!
//! A [`DecompressionStream`] accumulates the frame header across arbitrarily
//! fragmented feeds, sizes its input staging buffer from the block-size class
//! the header declares, and then alternates append / decode / compact for the
//! rest of the stream. Output goes through a fixed-size buffer; one feed call
//! never produces more than [`DECODE_CHUNK_MAX`] bytes.

use crate::buffer::{alloc_bytes, StagingBuffer};
use crate::codec::lz4f::Lz4fDecompressor;
use crate::codec::DecompressContext;
use crate::error::{Result, StreamError};
use crate::frame::{BlockSizeClass, DECODE_CHUNK_MAX, FRAME_HEADER_SIZE};

/// Decoder state. Advances `AwaitingHeader → Decoding` exactly once; any
/// fatal error parks the stream in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// Fewer than [`FRAME_HEADER_SIZE`] header bytes received so far.
    AwaitingHeader,
    /// Header parsed; block data is being accumulated and decoded.
    Decoding,
    /// A fatal error occurred; the stream only returns [`StreamError::Failed`].
    Failed,
}

/// Incremental consumer of one compressed frame.
pub struct DecompressionStream<D: DecompressContext = Lz4fDecompressor> {
    ctx: D,
    stage: DecodeStage,
    /// Header accumulation scratch; filled to `header_len`.
    header: [u8; FRAME_HEADER_SIZE],
    header_len: usize,
    /// Compressed-byte staging area. Zero-capacity until the header is
    /// parsed, then exactly one block-size class worth of capacity.
    input: StagingBuffer,
    /// Fixed-size decode destination, reused every call.
    output: Box<[u8]>,
}

impl DecompressionStream<Lz4fDecompressor> {
    /// Create a stream backed by a fresh liblz4 decompression context.
    pub fn new() -> Result<Self> {
        let ctx = Lz4fDecompressor::create().map_err(StreamError::ContextCreation)?;
        Self::with_context(ctx)
    }
}

impl<D: DecompressContext> DecompressionStream<D> {
    /// Create a stream around an existing codec context.
    pub fn with_context(ctx: D) -> Result<Self> {
        Ok(DecompressionStream {
            ctx,
            stage: DecodeStage::AwaitingHeader,
            header: [0u8; FRAME_HEADER_SIZE],
            header_len: 0,
            input: StagingBuffer::empty(),
            output: alloc_bytes(DECODE_CHUNK_MAX)?,
        })
    }

    pub fn stage(&self) -> DecodeStage {
        self.stage
    }

    /// Capacity of the input staging buffer, once the header has fixed it.
    pub fn block_capacity(&self) -> Option<usize> {
        match self.stage {
            DecodeStage::Decoding => Some(self.input.capacity()),
            _ => None,
        }
    }

    /// Feed one chunk of the compressed stream; returns decompressed bytes.
    ///
    /// An empty result is a valid "need more input" outcome, not an error:
    /// it is returned while the header is still incomplete, when a feed
    /// carries no block data, and when the codec needs more of the current
    /// block before it can produce output.
    ///
    /// The returned slice aliases stream-owned memory and is only valid
    /// until the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<&[u8]> {
        if self.stage == DecodeStage::Failed {
            return Err(StreamError::Failed);
        }
        let mut rest = chunk;

        if self.stage == DecodeStage::AwaitingHeader {
            let take = (FRAME_HEADER_SIZE - self.header_len).min(rest.len());
            self.header[self.header_len..self.header_len + take].copy_from_slice(&rest[..take]);
            self.header_len += take;
            rest = &rest[take..];
            if self.header_len == FRAME_HEADER_SIZE {
                self.enter_decoding()?;
            }
        }

        if rest.is_empty() {
            return Ok(&[]);
        }

        // Fatal: the caller fed more undigested data than one block can hold.
        if !self.input.try_append(rest) {
            let err = StreamError::BufferOverflow {
                buffered: self.input.len(),
                incoming: rest.len(),
                capacity: self.input.capacity(),
            };
            return self.fail(err);
        }

        let decode = match self.ctx.decompress_block(&mut self.output, self.input.filled()) {
            Ok(d) => d,
            Err(e) => return self.fail(StreamError::Codec(e)),
        };

        // Unconsumed bytes slide to the buffer start for the next feed.
        self.input.consume(decode.consumed);

        Ok(&self.output[..decode.produced])
    }

    /// Parse the completed header and allocate the input buffer for the
    /// block-size class it declares. Runs exactly once.
    fn enter_decoding(&mut self) -> Result<()> {
        let class = match self.ctx.parse_frame_header(&self.header) {
            Ok(c) => c,
            Err(e) => return self.fail(StreamError::Codec(e)),
        };
        let capacity = match BlockSizeClass::from_wire(class) {
            Some(c) => c.max_block_size(),
            None => return self.fail(StreamError::UnsupportedBlockSize { class }),
        };
        // Header-scratch bytes beyond what the parser consumed are padding
        // from the paired writer; they are dropped, not fed to the decoder.
        self.input = match StagingBuffer::with_capacity(capacity) {
            Ok(b) => b,
            Err(e) => return self.fail(e),
        };
        self.stage = DecodeStage::Decoding;
        log::debug!("frame header complete: block class {class}, {capacity} B input buffer");
        Ok(())
    }

    fn fail<T>(&mut self, err: StreamError) -> Result<T> {
        log::debug!("decompression stream poisoned: {err}");
        self.stage = DecodeStage::Failed;
        Err(err)
    }
}
