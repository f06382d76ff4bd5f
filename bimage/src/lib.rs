//! Convert textures stored in the bimage container to PNG.
//!
//! The container stores a single BC1 or BC3 compressed surface
//! without mipmaps or array layers.
//! Decoding produces tightly packed RGBA8 data that can be encoded
//! to a minimal PNG file with [encode_image_file].
//!
//! ```no_run
//! let bytes = std::fs::read("texture.bimage").unwrap();
//! let png = bimage::png_from_bimage(&bytes).unwrap();
//! std::fs::write("texture.png", png).unwrap();
//! ```
pub mod bcn;
mod container;
mod error;
pub mod png;

pub use container::{BimageHeader, BIMAGE_HEADER_SIZE};
pub use error::*;

/// Supported block compressed image formats.
///
/// Each format uses 4x4 pixel blocks in row-major order.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "strum", derive(strum::EnumIter))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ImageFormat {
    /// BC1 (DXT1) with 1-bit punch-through alpha.
    Bc1,
    /// BC3 (DXT5) with interpolated alpha.
    Bc3,
}

impl ImageFormat {
    /// The format code stored in the bimage header.
    pub fn format_code(&self) -> u8 {
        match self {
            ImageFormat::Bc1 => 0x0A,
            ImageFormat::Bc3 => 0x0B,
        }
    }

    /// The dimensions in pixels of a compressed block.
    pub fn block_dimensions(&self) -> (u32, u32) {
        (bcn::BLOCK_WIDTH as u32, bcn::BLOCK_HEIGHT as u32)
    }

    /// The size in bytes of a compressed block.
    pub fn block_size_in_bytes(&self) -> usize {
        match self {
            ImageFormat::Bc1 => bc13dec::BC1_BLOCK_SIZE,
            ImageFormat::Bc3 => bc13dec::BC3_BLOCK_SIZE,
        }
    }
}

impl TryFrom<u8> for ImageFormat {
    type Error = DecodeImageError;

    fn try_from(format_code: u8) -> Result<Self, Self::Error> {
        match format_code {
            0x0A => Ok(ImageFormat::Bc1),
            0x0B => Ok(ImageFormat::Bc3),
            _ => Err(DecodeImageError::UnsupportedFormat { format_code }),
        }
    }
}

/// Decodes a surface of dimensions `width` x `height` with the format identified by `format_code` to RGBA8.
///
/// Blocks missing from the end of `data` are left as transparent black.
/// See [bcn::rgba8_from_bcn] for details.
pub fn decode_block_image(
    data: &[u8],
    width: u32,
    height: u32,
    format_code: u8,
) -> Result<Vec<u8>, DecodeImageError> {
    let format = ImageFormat::try_from(format_code)?;
    bcn::rgba8_from_bcn(width, height, data, format)
}

/// Encodes `rgba8_data` with dimensions `width` x `height` to the bytes of a PNG file.
///
/// The data must contain exactly `width * height * 4` bytes.
pub fn encode_image_file(
    width: u32,
    height: u32,
    rgba8_data: &[u8],
) -> Result<Vec<u8>, EncodeImageError> {
    png::encode_png(width, height, rgba8_data)
}

/// Converts the bytes of a bimage file to the bytes of a PNG file.
///
/// No output is produced if any step fails.
pub fn png_from_bimage(bytes: &[u8]) -> Result<Vec<u8>, ConvertBimageError> {
    let (header, data) = BimageHeader::read(bytes)?;
    let rgba8 = decode_block_image(
        data,
        header.width as u32,
        header.height as u32,
        header.format_code,
    )?;
    let png = encode_image_file(header.width as u32, header.height as u32, &rgba8)?;
    Ok(png)
}

fn div_round_up(x: usize, d: usize) -> usize {
    (x + d - 1) / d
}
