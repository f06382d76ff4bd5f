//! A minimal PNG encoder for 8-bit RGBA images.
//!
//! The output contains only the IHDR, IDAT, and IEND chunks.
//! Scanlines are not filtered and the image data is stored in a single IDAT chunk.
use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};
use log::debug;

use crate::EncodeImageError;

mod crc;

pub use crc::{calc_crc, update_crc};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

// Chunk lengths and image dimensions are limited to 2^31 - 1.
const MAX_PNG_VALUE: usize = i32::MAX as usize;

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const COMPRESSION_METHOD: u8 = 0;
const FILTER_METHOD: u8 = 0;
const INTERLACE_NONE: u8 = 0;

const FILTER_TYPE_NONE: u8 = 0;

const CHANNELS: usize = 4;

/// A single PNG chunk with its checksum computed when written.
struct Chunk<'a> {
    chunk_type: [u8; 4],
    data: &'a [u8],
}

impl<'a> Chunk<'a> {
    fn new(chunk_type: &[u8; 4], data: &'a [u8]) -> Self {
        Self {
            chunk_type: *chunk_type,
            data,
        }
    }

    fn crc(&self) -> u32 {
        // Equal to crc(chunk_type + data) without copying the data.
        let crc = update_crc(u32::MAX, &self.chunk_type);
        !update_crc(crc, self.data)
    }

    // length - chunk type - [data] - crc
    fn write_to(&self, output: &mut Vec<u8>) -> Result<(), EncodeImageError> {
        if self.data.len() > MAX_PNG_VALUE {
            return Err(EncodeImageError::ChunkTooLarge {
                chunk_type: self.chunk_type,
                length: self.data.len(),
            });
        }

        output.reserve(self.data.len() + 12);
        output.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        output.extend_from_slice(&self.chunk_type);
        output.extend_from_slice(self.data);
        output.extend_from_slice(&self.crc().to_be_bytes());
        Ok(())
    }
}

/// Encode `rgba8_data` with dimensions `width` x `height` to the bytes of a PNG file.
///
/// The data must contain exactly `width * height * 4` bytes.
/// The image data is compressed with the highest zlib compression level.
pub fn encode_png(width: u32, height: u32, rgba8_data: &[u8]) -> Result<Vec<u8>, EncodeImageError> {
    if width == 0 || height == 0 || width as usize > MAX_PNG_VALUE || height as usize > MAX_PNG_VALUE
    {
        return Err(EncodeImageError::InvalidDimensions { width, height });
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(EncodeImageError::PixelCountWouldOverflow { width, height })?;

    if rgba8_data.len() != expected {
        return Err(EncodeImageError::BufferSizeMismatch {
            expected,
            actual: rgba8_data.len(),
        });
    }

    let scanlines = unfiltered_scanlines(width as usize, rgba8_data);
    let compressed = compress_zlib(&scanlines)?;
    debug!(
        "compressed {} bytes of scanlines for {width}x{height} image to {} bytes",
        scanlines.len(),
        compressed.len()
    );

    let ihdr = ihdr_data(width, height);

    let mut png = Vec::with_capacity(PNG_SIGNATURE.len() + compressed.len() + 3 * 12 + ihdr.len());
    png.extend_from_slice(&PNG_SIGNATURE);
    Chunk::new(b"IHDR", &ihdr).write_to(&mut png)?;
    Chunk::new(b"IDAT", &compressed).write_to(&mut png)?;
    Chunk::new(b"IEND", &[]).write_to(&mut png)?;

    Ok(png)
}

fn ihdr_data(width: u32, height: u32) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = BIT_DEPTH;
    data[9] = COLOR_TYPE_RGBA;
    data[10] = COMPRESSION_METHOD;
    data[11] = FILTER_METHOD;
    data[12] = INTERLACE_NONE;
    data
}

fn unfiltered_scanlines(width: usize, rgba8_data: &[u8]) -> Vec<u8> {
    // Each row starts with its filter type byte.
    let row_size = width * CHANNELS;
    let height = rgba8_data.len() / row_size;

    let mut scanlines = Vec::with_capacity(height * (row_size + 1));
    for row in rgba8_data.chunks_exact(row_size) {
        scanlines.push(FILTER_TYPE_NONE);
        scanlines.extend_from_slice(row);
    }
    scanlines
}

fn compress_zlib(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}
