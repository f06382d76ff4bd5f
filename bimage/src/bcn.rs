//! Decoding for the block compressed formats used by bimage files.
use crate::{DecodeImageError, ImageFormat};

mod decode;

pub use decode::{BcnDecode, ReadBlock};

// All supported formats use 4x4 pixel blocks.
pub const BLOCK_WIDTH: usize = 4;
pub const BLOCK_HEIGHT: usize = 4;
pub const CHANNELS: usize = 4;

/// BC1 (DXT1) blocks with 8 bytes per 4x4 pixels.
pub struct Bc1;

/// BC3 (DXT5) blocks with 16 bytes per 4x4 pixels.
pub struct Bc3;

/// Decompress the bytes in `data` to the uncompressed RGBA8 format.
///
/// The output always contains `width * height * 4` bytes.
/// Blocks that do not fit in `data` are skipped and left as transparent black,
/// so truncated surfaces still decode.
///
/// The `width` and `height` must both be in the range `1..=65535`.
pub fn rgba8_from_bcn(
    width: u32,
    height: u32,
    data: &[u8],
    format: ImageFormat,
) -> Result<Vec<u8>, DecodeImageError> {
    match format {
        ImageFormat::Bc1 => decode::decode_bcn::<Bc1>(width, height, data),
        ImageFormat::Bc3 => decode::decode_bcn::<Bc3>(width, height, data),
    }
}
