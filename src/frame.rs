//! LZ4 Frame format vocabulary used by the stream layer.
//!
//! Only the handful of constants the streams need: the header size class
//! table and the fixed buffer sizes. Block layout, checksums and everything
//! else inside a frame belong to the codec provider.

/// Maximum LZ4 frame header length in bytes.
///
/// The compression stream reserves this much header scratch and always emits
/// the full scratch as its first output; the decompression stream accumulates
/// exactly this many bytes before any block processing.
pub const FRAME_HEADER_SIZE: usize = 19;

/// Fixed capacity of the decompression output buffer. One decode call never
/// produces more than this many bytes.
pub const DECODE_CHUNK_MAX: usize = 8 * 1024;

/// Default maximum plaintext chunk size accepted per compression feed.
pub const DEFAULT_MAX_CHUNK: usize = 64 * 1024;

/// Block-size class selector carried in the frame header.
///
/// Wire IDs match the LZ4 Frame format: 0 is "default" (treated as 64 KiB),
/// 4–7 select the explicit sizes. Anything else is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BlockSizeClass {
    Default = 0,
    Max64Kb = 4,
    Max256Kb = 5,
    Max1Mb = 6,
    Max4Mb = 7,
}

impl BlockSizeClass {
    /// Decode a wire ID as reported by the codec's header parser.
    pub fn from_wire(id: u32) -> Option<Self> {
        match id {
            0 => Some(BlockSizeClass::Default),
            4 => Some(BlockSizeClass::Max64Kb),
            5 => Some(BlockSizeClass::Max256Kb),
            6 => Some(BlockSizeClass::Max1Mb),
            7 => Some(BlockSizeClass::Max4Mb),
            _ => None,
        }
    }

    /// Wire ID of this class.
    pub fn wire_id(self) -> u32 {
        self as u32
    }

    /// Byte capacity needed to accumulate one block of this class.
    pub fn max_block_size(self) -> usize {
        match self {
            BlockSizeClass::Default | BlockSizeClass::Max64Kb => 64 * 1024,
            BlockSizeClass::Max256Kb => 256 * 1024,
            BlockSizeClass::Max1Mb => 1024 * 1024,
            BlockSizeClass::Max4Mb => 4 * 1024 * 1024,
        }
    }
}
