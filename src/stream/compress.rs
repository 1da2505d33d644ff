//! Streaming frame compression.
//!
//! A [`CompressionStream`] owns one codec compression context and one output
//! buffer sized from the codec's worst-case bound for the configured maximum
//! chunk size. The frame header is rendered once at construction; the first
//! `feed` call emits it, and every later call compresses one plaintext chunk
//! into the reused buffer.

use crate::buffer::alloc_bytes;
use crate::codec::lz4f::Lz4fCompressor;
use crate::codec::CompressContext;
use crate::error::{Result, StreamError};
use crate::frame::FRAME_HEADER_SIZE;

/// Incremental producer of one compressed frame.
///
/// Generic over the codec provider so the state machine can be tested with a
/// deterministic fake; defaults to the liblz4 contexts.
pub struct CompressionStream<C: CompressContext = Lz4fCompressor> {
    ctx: C,
    /// Reused output buffer; capacity fixed at construction.
    output: Box<[u8]>,
    /// Pre-rendered frame header, emitted in full by the first feed.
    header: [u8; FRAME_HEADER_SIZE],
    header_emitted: bool,
    max_chunk_size: usize,
    failed: bool,
}

impl CompressionStream<Lz4fCompressor> {
    /// Create a stream backed by a fresh liblz4 compression context.
    ///
    /// `max_chunk_size` fixes the largest chunk a single [`feed`] call will
    /// accept; the output buffer is sized for it once and never grows.
    ///
    /// [`feed`]: CompressionStream::feed
    pub fn new(max_chunk_size: usize) -> Result<Self> {
        let ctx = Lz4fCompressor::create().map_err(StreamError::ContextCreation)?;
        Self::with_context(ctx, max_chunk_size)
    }
}

impl<C: CompressContext> CompressionStream<C> {
    /// Create a stream around an existing codec context.
    pub fn with_context(mut ctx: C, max_chunk_size: usize) -> Result<Self> {
        // The floor covers the degenerate finish-without-feed case, where
        // header and trailer share one emission.
        let capacity = ctx
            .worst_case_bound(max_chunk_size)
            .max(FRAME_HEADER_SIZE + ctx.worst_case_bound(0));
        let output = alloc_bytes(capacity)?;
        let mut header = [0u8; FRAME_HEADER_SIZE];
        let significant = ctx.begin_frame(&mut header)?;
        log::debug!(
            "compression stream ready: max chunk {max_chunk_size} B, \
             output capacity {capacity} B, header {significant}/{FRAME_HEADER_SIZE} B"
        );
        Ok(CompressionStream {
            ctx,
            output,
            header,
            header_emitted: false,
            max_chunk_size,
            failed: false,
        })
    }

    /// Largest chunk a single `feed` call accepts.
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// `true` once a fatal error has poisoned the stream.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Feed one plaintext chunk; returns the bytes to append to the
    /// compressed stream.
    ///
    /// The first call emits exactly the [`FRAME_HEADER_SIZE`]-byte frame
    /// header and produces no compressed bytes from `chunk` — callers prime
    /// the stream with an empty chunk before feeding real data. Subsequent
    /// calls return the compressed representation of `chunk`, which may be
    /// empty while the codec accumulates a full block internally.
    ///
    /// The returned slice aliases stream-owned memory and is only valid
    /// until the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<&[u8]> {
        if self.failed {
            return Err(StreamError::Failed);
        }
        if chunk.len() > self.max_chunk_size {
            return self.fail(StreamError::OversizedChunk {
                len: chunk.len(),
                max: self.max_chunk_size,
            });
        }
        if !self.header_emitted {
            self.header_emitted = true;
            log::trace!("emitting frame header");
            return Ok(&self.header[..]);
        }
        let produced = match self.ctx.compress_block(&mut self.output, chunk) {
            Ok(n) => n,
            Err(e) => return self.fail(StreamError::Codec(e)),
        };
        Ok(&self.output[..produced])
    }

    /// Flush any codec-buffered tail data and emit the end-of-frame marker.
    ///
    /// Without this, input shorter than one block would stay buffered inside
    /// the codec and never reach the output. A stream that was never fed
    /// emits the header first, so even an empty session yields a complete
    /// frame.
    pub fn finish(&mut self) -> Result<&[u8]> {
        if self.failed {
            return Err(StreamError::Failed);
        }
        let mut emitted = 0;
        if !self.header_emitted {
            self.output[..FRAME_HEADER_SIZE].copy_from_slice(&self.header);
            self.header_emitted = true;
            emitted = FRAME_HEADER_SIZE;
        }
        let tail = match self.ctx.end_frame(&mut self.output[emitted..]) {
            Ok(n) => n,
            Err(e) => return self.fail(StreamError::Codec(e)),
        };
        log::trace!("frame finished: {tail} trailer bytes");
        Ok(&self.output[..emitted + tail])
    }

    fn fail<T>(&mut self, err: StreamError) -> Result<T> {
        log::debug!("compression stream poisoned: {err}");
        self.failed = true;
        Err(err)
    }
}
