use log::{debug, warn};

use crate::{div_round_up, DecodeImageError};

use super::{Bc1, Bc3, BLOCK_HEIGHT, BLOCK_WIDTH, CHANNELS};

pub trait BcnDecode<Pixel> {
    type CompressedBlock;

    // The decoded 4x4 pixel blocks are in row-major ordering.
    // Fixing the length should reduce the amount of bounds checking.
    fn decompress_block(block: &Self::CompressedBlock) -> [[Pixel; BLOCK_WIDTH]; BLOCK_HEIGHT];
}

// Allows block types to read and copy buffer data to enforce alignment.
pub trait ReadBlock: Sized {
    const SIZE_IN_BYTES: usize;

    /// Returns [None] if the block is not fully contained within `data`.
    fn read_block(data: &[u8], offset: usize) -> Option<Self>;
}

impl ReadBlock for [u8; 8] {
    const SIZE_IN_BYTES: usize = 8;

    fn read_block(data: &[u8], offset: usize) -> Option<Self> {
        data.get(offset..offset.checked_add(8)?)?.try_into().ok()
    }
}

impl ReadBlock for [u8; 16] {
    const SIZE_IN_BYTES: usize = 16;

    fn read_block(data: &[u8], offset: usize) -> Option<Self> {
        data.get(offset..offset.checked_add(16)?)?.try_into().ok()
    }
}

impl BcnDecode<[u8; 4]> for Bc1 {
    type CompressedBlock = [u8; 8];

    fn decompress_block(block: &[u8; 8]) -> [[[u8; 4]; BLOCK_WIDTH]; BLOCK_HEIGHT] {
        let mut decompressed = [[[0u8; 4]; BLOCK_WIDTH]; BLOCK_HEIGHT];

        bc13dec::bc1(
            block,
            bytemuck::cast_slice_mut(&mut decompressed),
            BLOCK_WIDTH * CHANNELS,
        );

        decompressed
    }
}

impl BcnDecode<[u8; 4]> for Bc3 {
    type CompressedBlock = [u8; 16];

    fn decompress_block(block: &[u8; 16]) -> [[[u8; 4]; BLOCK_WIDTH]; BLOCK_HEIGHT] {
        let mut decompressed = [[[0u8; 4]; BLOCK_WIDTH]; BLOCK_HEIGHT];

        bc13dec::bc3(
            block,
            bytemuck::cast_slice_mut(&mut decompressed),
            BLOCK_WIDTH * CHANNELS,
        );

        decompressed
    }
}

/// Decompress the bytes in `data` to the uncompressed RGBA8 format.
pub fn decode_bcn<F>(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, DecodeImageError>
where
    F: BcnDecode<[u8; 4]>,
    F::CompressedBlock: ReadBlock,
{
    // Dimensions are stored as u16 in the container.
    if width == 0 || height == 0 || width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(DecodeImageError::InvalidDimensions { width, height });
    }

    let pixel_bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(DecodeImageError::InvalidDimensions { width, height })?;

    let width = width as usize;
    let height = height as usize;

    let blocks_per_row = div_round_up(width, BLOCK_WIDTH);
    let blocks_per_column = div_round_up(height, BLOCK_HEIGHT);
    debug!(
        "decoding {width}x{height} surface with {blocks_per_row}x{blocks_per_column} blocks from {} bytes",
        data.len()
    );

    let mut rgba = vec![0u8; pixel_bytes];

    // BCN formats lay out blocks in row-major order.
    // Missing blocks keep the zero initialized transparent black pixels.
    let mut skipped_blocks = 0usize;
    for block_y in 0..blocks_per_column {
        for block_x in 0..blocks_per_row {
            let block_index = block_y * blocks_per_row + block_x;
            let block_start = block_index * F::CompressedBlock::SIZE_IN_BYTES;

            match F::CompressedBlock::read_block(data, block_start) {
                Some(block) => {
                    let decompressed_block = F::decompress_block(&block);

                    // Each block is 4x4, so we need to update multiple rows.
                    put_rgba_block(
                        &mut rgba,
                        decompressed_block,
                        block_x * BLOCK_WIDTH,
                        block_y * BLOCK_HEIGHT,
                        width,
                        height,
                    );
                }
                None => skipped_blocks += 1,
            }
        }
    }

    if skipped_blocks > 0 {
        warn!(
            "surface data has {} bytes but needs {} bytes, {skipped_blocks} blocks left blank",
            data.len(),
            blocks_per_row * blocks_per_column * F::CompressedBlock::SIZE_IN_BYTES
        );
    }

    Ok(rgba)
}

fn put_rgba_block(
    surface: &mut [u8],
    pixels: [[[u8; 4]; BLOCK_WIDTH]; BLOCK_HEIGHT],
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) {
    // Place the compressed block into the decompressed surface.
    // The data from each block will update up to 4 rows of the RGBA surface.
    // Pixels past the right or bottom edge are discarded.
    let elements_per_row = CHANNELS * BLOCK_WIDTH.min(width - x);

    for (row, row_pixels) in pixels.iter().enumerate().take(BLOCK_HEIGHT.min(height - y)) {
        // Convert pixel coordinates to byte coordinates.
        let surface_index = ((y + row) * width + x) * CHANNELS;
        surface[surface_index..surface_index + elements_per_row]
            .copy_from_slice(&bytemuck::cast_slice(row_pixels)[..elements_per_row]);
    }
}
