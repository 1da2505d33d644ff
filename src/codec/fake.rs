//! Deterministic stored-block codec for exercising the stream state
//! machines without liblz4.
//!
//! Wire shape: a 5-significant-byte header (`b"FKC1"` magic + block-size
//! class byte), then length-prefixed records (`u32` LE length + raw
//! payload). A zero-length record is the end marker. Record lengths above
//! [`FAKE_BLOCK_LIMIT`] are treated as corruption so tests can drive the
//! codec-failure path.

use crate::codec::{BlockDecode, CodecFailure, CompressContext, DecompressContext};

const FAKE_MAGIC: [u8; 4] = *b"FKC1";
const FAKE_BLOCK_LIMIT: usize = 4 * 1024 * 1024;

pub struct FakeCompressor {
    class: u32,
    pub fail_next: bool,
}

impl FakeCompressor {
    pub fn new() -> Self {
        Self::with_class(4)
    }

    /// Declare an arbitrary block-size class in the header, including
    /// unsupported ones.
    pub fn with_class(class: u32) -> Self {
        FakeCompressor {
            class,
            fail_next: false,
        }
    }
}

impl CompressContext for FakeCompressor {
    fn worst_case_bound(&self, src_size: usize) -> usize {
        // Length prefix plus room for the end marker.
        src_size + 8
    }

    fn begin_frame(&mut self, dst: &mut [u8]) -> Result<usize, CodecFailure> {
        if dst.len() < 5 {
            return Err(CodecFailure::new("fake_begin", "header scratch too small"));
        }
        dst[..4].copy_from_slice(&FAKE_MAGIC);
        dst[4] = self.class as u8;
        Ok(5)
    }

    fn compress_block(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, CodecFailure> {
        if self.fail_next {
            self.fail_next = false;
            return Err(CodecFailure::new("fake_compress", "injected failure"));
        }
        if dst.len() < src.len() + 4 {
            return Err(CodecFailure::new("fake_compress", "output buffer too small"));
        }
        dst[..4].copy_from_slice(&(src.len() as u32).to_le_bytes());
        dst[4..4 + src.len()].copy_from_slice(src);
        Ok(4 + src.len())
    }

    fn end_frame(&mut self, dst: &mut [u8]) -> Result<usize, CodecFailure> {
        if dst.len() < 4 {
            return Err(CodecFailure::new("fake_end", "output buffer too small"));
        }
        dst[..4].copy_from_slice(&0u32.to_le_bytes());
        Ok(4)
    }
}

pub struct FakeDecompressor;

impl DecompressContext for FakeDecompressor {
    fn parse_frame_header(&mut self, header: &[u8]) -> Result<u32, CodecFailure> {
        if header.len() < 5 || header[..4] != FAKE_MAGIC {
            return Err(CodecFailure::new("fake_frame_info", "bad magic"));
        }
        Ok(u32::from(header[4]))
    }

    fn decompress_block(&mut self, dst: &mut [u8], src: &[u8]) -> Result<BlockDecode, CodecFailure> {
        let mut consumed = 0;
        let mut produced = 0;
        loop {
            let rest = &src[consumed..];
            if rest.len() < 4 {
                break;
            }
            let len = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
            if len > FAKE_BLOCK_LIMIT {
                return Err(CodecFailure::new("fake_decompress", "corrupt record length"));
            }
            if len == 0 {
                // End marker.
                consumed += 4;
                continue;
            }
            if rest.len() < 4 + len || produced + len > dst.len() {
                break;
            }
            dst[produced..produced + len].copy_from_slice(&rest[4..4 + len]);
            produced += len;
            consumed += 4 + len;
        }
        Ok(BlockDecode { consumed, produced })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_survive_arbitrary_splits() {
        let mut c = FakeCompressor::new();
        let mut rec = vec![0u8; c.worst_case_bound(6)];
        let n = c.compress_block(&mut rec, b"abcdef").unwrap();
        rec.truncate(n);

        let mut d = FakeDecompressor;
        let mut out = [0u8; 16];
        // Partial record: nothing consumed, nothing produced.
        let dec = d.decompress_block(&mut out, &rec[..5]).unwrap();
        assert_eq!(dec, BlockDecode { consumed: 0, produced: 0 });
        // Complete record: fully consumed.
        let dec = d.decompress_block(&mut out, &rec).unwrap();
        assert_eq!(dec, BlockDecode { consumed: 10, produced: 6 });
        assert_eq!(&out[..6], b"abcdef");
    }

    #[test]
    fn oversized_record_length_is_corruption() {
        let mut d = FakeDecompressor;
        let mut out = [0u8; 16];
        let bogus = (FAKE_BLOCK_LIMIT as u32 + 1).to_le_bytes();
        assert!(d.decompress_block(&mut out, &bogus).is_err());
    }
}
