use crate::ReadBimageError;

/// The size in bytes of the header preceding the compressed surface data.
pub const BIMAGE_HEADER_SIZE: usize = 0x48;

const WIDTH_OFFSET: usize = 0x0E;
const HEIGHT_OFFSET: usize = 0x12;
const FORMAT_OFFSET: usize = 0x23;

/// The fields of a bimage header needed to decode the surface.
///
/// The remaining header bytes are not used.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BimageHeader {
    /// The width of the surface in pixels.
    pub width: u16,
    /// The height of the surface in pixels.
    pub height: u16,
    /// The format code for the compressed data.
    /// Convert to an [ImageFormat](crate::ImageFormat) using [TryFrom].
    pub format_code: u8,
}

impl BimageHeader {
    /// Read the header from the start of `bytes` and return the compressed surface data after the header.
    ///
    /// The format code is not validated, so unsupported formats can still be inspected.
    pub fn read(bytes: &[u8]) -> Result<(Self, &[u8]), ReadBimageError> {
        if bytes.len() < BIMAGE_HEADER_SIZE {
            return Err(ReadBimageError::NotEnoughData {
                expected: BIMAGE_HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let header = Self {
            width: read_u16_be(bytes, WIDTH_OFFSET),
            height: read_u16_be(bytes, HEIGHT_OFFSET),
            format_code: bytes[FORMAT_OFFSET],
        };

        Ok((header, &bytes[BIMAGE_HEADER_SIZE..]))
    }
}

fn read_u16_be(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}
