//! Default codec provider: liblz4's `LZ4F_*` streaming contexts.
//!
//! Thin safe wrappers over the raw bindings in `lz4::liblz4`. Each wrapper
//! owns exactly one native context and frees it on drop; every fallible call
//! goes through [`check`], which converts liblz4's error-code convention
//! into a [`CodecFailure`] carrying the `LZ4F_getErrorName` string.
//!
//! All calls use liblz4's default preferences (null pointer), which select
//! 64 KiB linked blocks and no checksums beyond the header byte.

use std::ffi::CStr;
use std::mem;
use std::ptr;

use libc::{c_uint, size_t};
use lz4::liblz4::{
    LZ4FCompressionContext, LZ4FDecompressionContext, LZ4FErrorCode, LZ4FFrameInfo,
    LZ4F_compressBegin, LZ4F_compressBound, LZ4F_compressEnd, LZ4F_compressUpdate,
    LZ4F_createCompressionContext, LZ4F_createDecompressionContext, LZ4F_decompress,
    LZ4F_freeCompressionContext, LZ4F_freeDecompressionContext, LZ4F_getErrorName,
    LZ4F_getFrameInfo, LZ4F_isError,
};

use crate::codec::{BlockDecode, CodecFailure, CompressContext, DecompressContext};

/// Frame API version passed to context creation.
const LZ4F_API_VERSION: c_uint = 100;

/// Map a raw `LZ4F_*` return code to `Ok(byte count)` or a named failure.
fn check(op: &'static str, code: LZ4FErrorCode) -> Result<usize, CodecFailure> {
    if unsafe { LZ4F_isError(code) } != 0 {
        let name = unsafe { CStr::from_ptr(LZ4F_getErrorName(code)) };
        Err(CodecFailure::new(op, name.to_string_lossy().into_owned()))
    } else {
        Ok(code as usize)
    }
}

/// Owned `LZ4F_cctx`.
pub struct Lz4fCompressor {
    raw: *mut libc::c_void,
}

// The native context is not aliased and liblz4 contexts may move between
// threads as long as a single owner drives them.
unsafe impl Send for Lz4fCompressor {}

impl Lz4fCompressor {
    pub fn create() -> Result<Self, CodecFailure> {
        let mut ctx = LZ4FCompressionContext(ptr::null_mut());
        let code = unsafe { LZ4F_createCompressionContext(&mut ctx, LZ4F_API_VERSION) };
        check("LZ4F_createCompressionContext", code)?;
        Ok(Lz4fCompressor { raw: ctx.0 })
    }
}

impl CompressContext for Lz4fCompressor {
    fn worst_case_bound(&self, src_size: usize) -> usize {
        // Never errors; accounts for worst-case internal buffering.
        unsafe { LZ4F_compressBound(src_size as size_t, ptr::null()) as usize }
    }

    fn begin_frame(&mut self, dst: &mut [u8]) -> Result<usize, CodecFailure> {
        let code = unsafe {
            LZ4F_compressBegin(
                LZ4FCompressionContext(self.raw),
                dst.as_mut_ptr(),
                dst.len() as size_t,
                ptr::null(),
            )
        };
        check("LZ4F_compressBegin", code)
    }

    fn compress_block(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, CodecFailure> {
        let code = unsafe {
            LZ4F_compressUpdate(
                LZ4FCompressionContext(self.raw),
                dst.as_mut_ptr(),
                dst.len() as size_t,
                src.as_ptr(),
                src.len() as size_t,
                ptr::null(),
            )
        };
        check("LZ4F_compressUpdate", code)
    }

    fn end_frame(&mut self, dst: &mut [u8]) -> Result<usize, CodecFailure> {
        let code = unsafe {
            LZ4F_compressEnd(
                LZ4FCompressionContext(self.raw),
                dst.as_mut_ptr(),
                dst.len() as size_t,
                ptr::null(),
            )
        };
        check("LZ4F_compressEnd", code)
    }
}

impl Drop for Lz4fCompressor {
    fn drop(&mut self) {
        unsafe {
            LZ4F_freeCompressionContext(LZ4FCompressionContext(self.raw));
        }
    }
}

/// Owned `LZ4F_dctx`.
pub struct Lz4fDecompressor {
    raw: *mut libc::c_void,
}

unsafe impl Send for Lz4fDecompressor {}

impl Lz4fDecompressor {
    pub fn create() -> Result<Self, CodecFailure> {
        let mut ctx = LZ4FDecompressionContext(ptr::null_mut());
        let code = unsafe { LZ4F_createDecompressionContext(&mut ctx, LZ4F_API_VERSION) };
        check("LZ4F_createDecompressionContext", code)?;
        Ok(Lz4fDecompressor { raw: ctx.0 })
    }
}

impl DecompressContext for Lz4fDecompressor {
    fn parse_frame_header(&mut self, header: &[u8]) -> Result<u32, CodecFailure> {
        let mut info: LZ4FFrameInfo = unsafe { mem::zeroed() };
        let mut src_size = header.len() as size_t;
        let code = unsafe {
            LZ4F_getFrameInfo(
                LZ4FDecompressionContext(self.raw),
                &mut info,
                header.as_ptr(),
                &mut src_size,
            )
        };
        check("LZ4F_getFrameInfo", code)?;
        Ok(info.block_size_id as u32)
    }

    fn decompress_block(&mut self, dst: &mut [u8], src: &[u8]) -> Result<BlockDecode, CodecFailure> {
        let mut dst_size = dst.len() as size_t;
        let mut src_size = src.len() as size_t;
        let code = unsafe {
            LZ4F_decompress(
                LZ4FDecompressionContext(self.raw),
                dst.as_mut_ptr(),
                &mut dst_size,
                src.as_ptr(),
                &mut src_size,
                ptr::null(),
            )
        };
        check("LZ4F_decompress", code)?;
        Ok(BlockDecode {
            consumed: src_size as usize,
            produced: dst_size as usize,
        })
    }
}

impl Drop for Lz4fDecompressor {
    fn drop(&mut self) {
        unsafe {
            LZ4F_freeDecompressionContext(LZ4FDecompressionContext(self.raw));
        }
    }
}
